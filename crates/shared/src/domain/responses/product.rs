use crate::{
    catalog::{discount_percentage, display_image},
    model::{Facets, Product, ReviewWithUser},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub images: Vec<String>,
    /// Resolved display path, never empty.
    pub image: String,
    pub category: String,
    pub rating: f64,
    pub material: Option<String>,
    pub collection: Option<String>,
    pub on_sale: bool,
    pub featured: bool,
    pub is_new: bool,
    pub discount_percentage: Option<i32>,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        let image = display_image(&value.images, Some(&value.category));
        let discount_percentage =
            discount_percentage(value.price, value.original_price, value.on_sale);

        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            original_price: value.original_price,
            images: value.images,
            image,
            category: value.category,
            rating: value.rating,
            material: value.material,
            collection: value.collection,
            on_sale: value.on_sale,
            featured: value.featured,
            is_new: value.is_new,
            discount_percentage,
            stock: value.stock,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewerResponse {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub user: ReviewerResponse,
}

impl From<ReviewWithUser> for ReviewResponse {
    fn from(value: ReviewWithUser) -> Self {
        Self {
            id: value.id,
            rating: value.rating,
            comment: value.comment,
            created_at: value.created_at,
            user: ReviewerResponse {
                id: value.user_id,
                name: value.user_name,
                image: value.user_image,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub reviews: Vec<ReviewResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub products: Vec<ProductResponse>,
    pub total_count: i64,
    pub current_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductFacetsResponse {
    pub categories: Vec<String>,
    pub materials: Vec<String>,
    pub collections: Vec<String>,
}

impl From<Facets> for ProductFacetsResponse {
    fn from(value: Facets) -> Self {
        Self {
            categories: value.categories,
            materials: value.materials,
            collections: value.collections,
        }
    }
}
