use crate::model::Product;
use std::cmp::Ordering;

/// Home-page carousel a product belongs to. Each product lands in at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Bestsellers,
    NewArrivals,
    HotDeals,
}

impl Tier {
    /// Strict priority: featured, then new, then on sale.
    pub fn of(featured: bool, is_new: bool, on_sale: bool) -> Option<Tier> {
        if featured {
            Some(Tier::Bestsellers)
        } else if is_new {
            Some(Tier::NewArrivals)
        } else if on_sale {
            Some(Tier::HotDeals)
        } else {
            None
        }
    }

    pub fn for_product(product: &Product) -> Option<Tier> {
        Tier::of(product.featured, product.is_new, product.on_sale)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HomeBuckets {
    pub bestsellers: Vec<Product>,
    pub new_arrivals: Vec<Product>,
    pub hot_deals: Vec<Product>,
}

impl HomeBuckets {
    pub fn partition(products: impl IntoIterator<Item = Product>) -> Self {
        let mut buckets = HomeBuckets::default();

        for product in products {
            match Tier::for_product(&product) {
                Some(Tier::Bestsellers) => buckets.bestsellers.push(product),
                Some(Tier::NewArrivals) => buckets.new_arrivals.push(product),
                Some(Tier::HotDeals) => buckets.hot_deals.push(product),
                None => {}
            }
        }

        buckets.bestsellers.sort_by(by_name);
        buckets.new_arrivals.sort_by(by_name);
        buckets.hot_deals.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| by_name(a, b)));

        buckets
    }

    pub fn is_empty(&self) -> bool {
        self.bestsellers.is_empty() && self.new_arrivals.is_empty() && self.hot_deals.is_empty()
    }
}

fn by_name(a: &Product, b: &Product) -> Ordering {
    a.name.cmp(&b.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::product;
    use rust_decimal::Decimal;

    #[test]
    fn featured_wins_over_every_other_flag() {
        assert_eq!(Tier::of(true, true, true), Some(Tier::Bestsellers));
        assert_eq!(Tier::of(false, true, true), Some(Tier::NewArrivals));
        assert_eq!(Tier::of(false, false, true), Some(Tier::HotDeals));
        assert_eq!(Tier::of(false, false, false), None);
    }

    #[test]
    fn buckets_are_disjoint_and_ordered() {
        let mut a = product("Zircon Ring", Decimal::new(5000, 2));
        a.featured = true;
        a.is_new = true;
        let mut b = product("Amber Ring", Decimal::new(9000, 2));
        b.featured = true;
        let mut c = product("Pearl Studs", Decimal::new(3000, 2));
        c.is_new = true;
        c.on_sale = true;
        let mut d = product("Gold Cuff", Decimal::new(12000, 2));
        d.on_sale = true;
        let mut e = product("Silver Cuff", Decimal::new(2000, 2));
        e.on_sale = true;
        let plain = product("Plain Band", Decimal::new(1000, 2));

        let buckets = HomeBuckets::partition(vec![a, b, c, d, e, plain]);

        fn names(v: &[Product]) -> Vec<&str> {
            v.iter().map(|p| p.name.as_str()).collect()
        }
        assert_eq!(names(&buckets.bestsellers), ["Amber Ring", "Zircon Ring"]);
        assert_eq!(names(&buckets.new_arrivals), ["Pearl Studs"]);
        assert_eq!(names(&buckets.hot_deals), ["Silver Cuff", "Gold Cuff"]);
    }

    #[test]
    fn no_flags_means_empty_buckets() {
        let buckets = HomeBuckets::partition(vec![product("Plain", Decimal::ONE)]);
        assert!(buckets.is_empty());
    }
}
