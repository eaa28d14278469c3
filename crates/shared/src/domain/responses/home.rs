use crate::{
    catalog::HomeBuckets,
    domain::responses::ProductResponse,
    model::{CatalogCounts, Product},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total: i64,
    pub featured: i64,
    pub is_new: i64,
    pub on_sale: i64,
}

impl From<CatalogCounts> for CatalogSummary {
    fn from(value: CatalogCounts) -> Self {
        Self {
            total: value.total,
            featured: value.featured,
            is_new: value.is_new,
            on_sale: value.on_sale,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub bestsellers: Vec<ProductResponse>,
    pub new_arrivals: Vec<ProductResponse>,
    pub hot_deals: Vec<ProductResponse>,
    pub summary: CatalogSummary,
}

impl HomeResponse {
    pub fn new(buckets: HomeBuckets, summary: CatalogSummary) -> Self {
        let convert = |items: Vec<Product>| -> Vec<ProductResponse> {
            items.into_iter().map(ProductResponse::from).collect()
        };
        Self {
            bestsellers: convert(buckets.bestsellers),
            new_arrivals: convert(buckets.new_arrivals),
            hot_deals: convert(buckets.hot_deals),
            summary,
        }
    }
}
