mod command;
mod query;

pub use self::command::ProductCommandService;
pub use self::query::ProductQueryService;

use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
        DynProductQueryService,
    },
    errors::ServiceError,
    utils::Metrics,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductService {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
}

impl ProductService {
    pub async fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let query = Arc::new(
            ProductQueryService::new(
                query,
                Arc::new(Mutex::new(Metrics::new())),
                registry.clone(),
            )
            .await,
        ) as DynProductQueryService;

        let command = Arc::new(
            ProductCommandService::new(
                command,
                Arc::new(Mutex::new(Metrics::new())),
                registry.clone(),
            )
            .await,
        ) as DynProductCommandService;

        Self { query, command }
    }
}

pub(crate) fn parse_product_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id.trim())
        .map_err(|_| ServiceError::Validation(vec!["Invalid product ID".to_string()]))
}
