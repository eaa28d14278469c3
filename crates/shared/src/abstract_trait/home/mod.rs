use crate::{
    domain::responses::{CatalogSummary, HomeResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynHomeService = Arc<dyn HomeServiceTrait + Send + Sync>;

#[async_trait]
pub trait HomeServiceTrait {
    /// Never fails; store errors yield empty carousels.
    async fn home(&self) -> HomeResponse;
    async fn summary(&self) -> Result<CatalogSummary, ServiceError>;
}
