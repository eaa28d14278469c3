use crate::{
    domain::{
        requests::{FindAllProductsQuery, ProductFilter},
        responses::{ProductDetailResponse, ProductFacetsResponse, ProductsResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{CatalogCounts, Facets, Product, ReviewWithUser},
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// One page of matches plus the total match count.
    async fn find_all(
        &self,
        filter: &ProductFilter,
    ) -> Result<(Vec<Product>, i64), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;
    async fn find_reviews(&self, product_id: Uuid) -> Result<Vec<ReviewWithUser>, RepositoryError>;
    /// Products carrying at least one of the featured, new or on-sale flags.
    async fn find_curated(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_every(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn counts(&self) -> Result<CatalogCounts, RepositoryError>;
    async fn facets(&self) -> Result<Facets, RepositoryError>;
}

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(&self, req: &FindAllProductsQuery) -> Result<ProductsResponse, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<ProductDetailResponse, ServiceError>;
    async fn facets(&self) -> Result<ProductFacetsResponse, ServiceError>;
}
