use crate::{
    domain::responses::{ImportReport, SeedResponse, TagReport},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCatalogService = Arc<dyn CatalogServiceTrait + Send + Sync>;

#[async_trait]
pub trait CatalogServiceTrait {
    async fn seed_sample(&self) -> Result<SeedResponse, ServiceError>;
    async fn import_catalog(&self, reset: bool) -> Result<ImportReport, ServiceError>;
    async fn retag(&self) -> Result<TagReport, ServiceError>;
}
