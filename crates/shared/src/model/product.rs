use crate::catalog::canonical_images;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

/// The canonical jewelry categories. Products store the category as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Rings,
    Necklaces,
    Earrings,
    Bracelets,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Rings,
        Category::Necklaces,
        Category::Earrings,
        Category::Bracelets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rings => "Rings",
            Category::Necklaces => "Necklaces",
            Category::Earrings => "Earrings",
            Category::Bracelets => "Bracelets",
        }
    }

    pub fn default_image(&self) -> &'static str {
        match self {
            Category::Rings => "/images/ring.jpg",
            Category::Necklaces => "/images/necklace.jpg",
            Category::Earrings => "/images/earrings.jpg",
            Category::Bracelets => "/images/bracelet.jpg",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Raw `products` row. `images` is left as whatever JSON the column holds.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub category: String,
    pub material: Option<String>,
    pub collection: Option<String>,
    pub images: serde_json::Value,
    pub rating: f64,
    pub stock: i32,
    pub featured: bool,
    pub is_new: bool,
    pub on_sale: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub category: String,
    pub material: Option<String>,
    pub collection: Option<String>,
    pub images: Vec<String>,
    pub rating: f64,
    pub stock: i32,
    pub featured: bool,
    pub is_new: bool,
    pub on_sale: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            images: canonical_images(&row.images),
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            original_price: row.original_price,
            category: row.category,
            material: row.material,
            collection: row.collection,
            rating: row.rating,
            stock: row.stock,
            featured: row.featured,
            is_new: row.is_new,
            on_sale: row.on_sale,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, FromRow)]
pub struct CatalogCounts {
    pub total: i64,
    pub featured: i64,
    pub is_new: i64,
    pub on_sale: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Facets {
    pub categories: Vec<String>,
    pub materials: Vec<String>,
    pub collections: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("necklaces".parse::<Category>(), Ok(Category::Necklaces));
        assert_eq!(" EARRINGS ".parse::<Category>(), Ok(Category::Earrings));
        assert!("Brooches".parse::<Category>().is_err());
    }
}
