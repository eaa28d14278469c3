use crate::{
    abstract_trait::{DynProductQueryRepository, HomeServiceTrait},
    catalog::HomeBuckets,
    domain::responses::{CatalogSummary, HomeResponse},
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct HomeService {
    query: DynProductQueryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl HomeService {
    pub async fn new(query: DynProductQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Arc::new(Mutex::new(Metrics::new()));
        metrics
            .lock()
            .await
            .register(&mut *registry.lock().await, "home_service", "HomeService");

        Self { query, metrics }
    }
}

#[async_trait]
impl HomeServiceTrait for HomeService {
    async fn home(&self) -> HomeResponse {
        let tracing_ctx = TracingContext::start("home", "home_page");

        let buckets = match self.query.find_curated().await {
            Ok(products) => HomeBuckets::partition(products),
            Err(err) => {
                error!("❌ Failed to load curated products: {err:?}");
                tracing_ctx
                    .error(&self.metrics, Method::Get, "Failed to load curated products")
                    .await;
                return HomeResponse::default();
            }
        };

        let summary = match self.query.counts().await {
            Ok(counts) => CatalogSummary::from(counts),
            Err(err) => {
                error!("❌ Failed to count products: {err:?}");
                CatalogSummary::default()
            }
        };

        info!(
            "🏠 Home carousels | bestsellers={} new={} deals={}",
            buckets.bestsellers.len(),
            buckets.new_arrivals.len(),
            buckets.hot_deals.len()
        );

        tracing_ctx
            .success(&self.metrics, Method::Get, "Home page assembled")
            .await;

        HomeResponse::new(buckets, summary)
    }

    async fn summary(&self) -> Result<CatalogSummary, ServiceError> {
        let tracing_ctx = TracingContext::start("home", "catalog_summary");

        match self.query.counts().await {
            Ok(counts) => {
                tracing_ctx
                    .success(&self.metrics, Method::Get, "Catalog summary retrieved")
                    .await;
                Ok(CatalogSummary::from(counts))
            }
            Err(err) => {
                error!("❌ Failed to count products: {err:?}");
                tracing_ctx
                    .error(&self.metrics, Method::Get, "Failed to count products")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }
}
