use crate::{
    catalog::pricing::{MAX_DISCOUNT_PERCENT, MIN_DISCOUNT_PERCENT, discounted_price},
    model::Product,
};
use rand::{Rng, seq::SliceRandom};
use rust_decimal::Decimal;
use uuid::Uuid;

pub const MAX_FEATURED: usize = 20;
pub const MAX_NEW: usize = 25;
pub const MAX_ON_SALE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCounts {
    pub featured: usize,
    pub is_new: usize,
    pub on_sale: usize,
}

impl TagCounts {
    /// `min(20, ceil(n/2))` featured and `min(25, ceil(3n/5))` each for new and on sale.
    pub fn for_total(total: usize) -> Self {
        let half = total.div_ceil(2);
        let three_fifths = (total * 3).div_ceil(5);
        Self {
            featured: half.min(MAX_FEATURED),
            is_new: three_fifths.min(MAX_NEW),
            on_sale: three_fifths.min(MAX_ON_SALE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleUpdate {
    pub id: Uuid,
    pub original_price: Decimal,
    pub price: Decimal,
    pub percent: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TagPlan {
    pub featured: Vec<Uuid>,
    pub is_new: Vec<Uuid>,
    pub on_sale: Vec<SaleUpdate>,
}

/// Builds a tagging plan. Each flag is drawn from an independent shuffle, so a
/// product can end up with several flags.
pub fn plan_tags<R: Rng>(products: &[Product], rng: &mut R) -> TagPlan {
    let counts = TagCounts::for_total(products.len());
    let mut order: Vec<&Product> = products.iter().collect();

    order.shuffle(rng);
    let featured = order.iter().take(counts.featured).map(|p| p.id).collect();

    order.shuffle(rng);
    let is_new = order.iter().take(counts.is_new).map(|p| p.id).collect();

    order.shuffle(rng);
    let on_sale = order
        .iter()
        .take(counts.on_sale)
        .map(|p| sale_update(p, rng))
        .collect();

    TagPlan {
        featured,
        is_new,
        on_sale,
    }
}

fn sale_update<R: Rng>(product: &Product, rng: &mut R) -> SaleUpdate {
    let original = product.original_price.unwrap_or(product.price);
    let percent = rng.random_range(MIN_DISCOUNT_PERCENT..=MAX_DISCOUNT_PERCENT);
    SaleUpdate {
        id: product.id,
        original_price: original,
        price: discounted_price(original, percent),
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::product;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn counts_follow_ratios_and_caps() {
        assert_eq!(
            TagCounts::for_total(0),
            TagCounts { featured: 0, is_new: 0, on_sale: 0 }
        );
        assert_eq!(
            TagCounts::for_total(7),
            TagCounts { featured: 4, is_new: 5, on_sale: 5 }
        );
        assert_eq!(
            TagCounts::for_total(79),
            TagCounts { featured: 20, is_new: 25, on_sale: 25 }
        );
    }

    #[test]
    fn plan_picks_distinct_products_per_flag() {
        let products: Vec<Product> = (0..10)
            .map(|i| product(&format!("Item {i}"), Decimal::from(100 + i)))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        let plan = plan_tags(&products, &mut rng);

        assert_eq!(plan.featured.len(), 5);
        assert_eq!(plan.is_new.len(), 6);
        assert_eq!(plan.on_sale.len(), 6);
        assert_eq!(plan.featured.iter().collect::<HashSet<_>>().len(), 5);
        assert_eq!(
            plan.on_sale.iter().map(|s| s.id).collect::<HashSet<_>>().len(),
            6
        );
    }

    #[test]
    fn sale_prices_use_existing_original() {
        let mut discounted = product("Hoops", Decimal::from(60));
        discounted.original_price = Some(Decimal::from(80));
        let mut rng = StdRng::seed_from_u64(1);

        let plan = plan_tags(std::slice::from_ref(&discounted), &mut rng);

        let sale = &plan.on_sale[0];
        assert_eq!(sale.original_price, Decimal::from(80));
        assert!((MIN_DISCOUNT_PERCENT..=MAX_DISCOUNT_PERCENT).contains(&sale.percent));
        assert!(sale.original_price - sale.price >= Decimal::ONE);
    }
}
