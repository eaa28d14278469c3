mod images;
mod pricing;
mod selection;
mod tagging;

#[cfg(test)]
pub(crate) mod testing;

pub use self::images::{
    DEFAULT_PRODUCT_IMAGE, canonical_images, category_fallback, display_image, resolve_image_path,
};
pub use self::pricing::{
    MAX_DISCOUNT_PERCENT, MIN_DISCOUNT_PERCENT, discount_percentage, discounted_price,
};
pub use self::selection::{HomeBuckets, Tier};
pub use self::tagging::{SaleUpdate, TagCounts, TagPlan, plan_tags};

use crate::domain::requests::CreateProductRequest;

const SAMPLE_PRODUCTS: &str = include_str!("../../data/sample_products.json");
const FULL_CATALOG: &str = include_str!("../../data/catalog.json");

/// The fixed sample set written by the seed endpoint.
pub fn sample_products() -> Result<Vec<CreateProductRequest>, serde_json::Error> {
    serde_json::from_str(SAMPLE_PRODUCTS)
}

/// The full catalog inserted by the management tool, grouped Rings, Necklaces, Earrings, Bracelets.
pub fn full_catalog() -> Result<Vec<CreateProductRequest>, serde_json::Error> {
    serde_json::from_str(FULL_CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_has_twelve_products_with_every_tier() {
        let products = sample_products().unwrap();
        assert_eq!(products.len(), 12);
        assert!(products.iter().any(|p| p.featured));
        assert!(products.iter().any(|p| !p.featured && p.is_new));
        assert!(products.iter().any(|p| !p.featured && !p.is_new && p.on_sale));
    }

    #[test]
    fn full_catalog_covers_all_categories() {
        let products = full_catalog().unwrap();
        assert!(products.len() > 70);
        for category in ["Rings", "Necklaces", "Earrings", "Bracelets"] {
            assert!(products.iter().any(|p| p.category == category), "{category}");
        }
    }

    #[test]
    fn sale_samples_are_priced_below_original() {
        for product in sample_products().unwrap().iter().filter(|p| p.on_sale) {
            let original = product.original_price.unwrap();
            assert!(original > product.price, "{}", product.name);
        }
    }
}
