use crate::{
    abstract_trait::{CatalogServiceTrait, DynProductCommandRepository, DynProductQueryRepository},
    catalog::{TagPlan, full_catalog, plan_tags, sample_products},
    domain::responses::{ImportReport, ProductResponse, SeedResponse, TagReport},
    errors::{RepositoryError, ServiceError},
    model::Product,
    utils::{Method, Metrics, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub struct CatalogService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    metrics: Arc<Mutex<Metrics>>,
    rng_seed: Option<u64>,
}

pub struct CatalogServiceDeps {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
    /// Fixes the tagging shuffle when set.
    pub rng_seed: Option<u64>,
}

impl CatalogService {
    pub async fn new(deps: CatalogServiceDeps) -> Self {
        let CatalogServiceDeps {
            query,
            command,
            registry,
            rng_seed,
        } = deps;

        let metrics = Arc::new(Mutex::new(Metrics::new()));
        metrics.lock().await.register(
            &mut *registry.lock().await,
            "catalog_service",
            "CatalogService",
        );

        Self {
            query,
            command,
            metrics,
            rng_seed,
        }
    }

    fn plan(&self, products: &[Product]) -> TagPlan {
        match self.rng_seed {
            Some(seed) => plan_tags(products, &mut StdRng::seed_from_u64(seed)),
            None => plan_tags(products, &mut rand::rng()),
        }
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    async fn seed_sample(&self) -> Result<SeedResponse, ServiceError> {
        info!("🌱 Seeding sample products");

        let method = Method::Post;
        let tracing_ctx = TracingContext::start("catalog", "seed_sample");

        let items = match sample_products() {
            Ok(items) => items,
            Err(err) => {
                error!("❌ Sample data is unreadable: {err}");
                tracing_ctx
                    .error(&self.metrics, method, "Sample data is unreadable")
                    .await;
                return Err(ServiceError::Internal(format!("Failed to seed database: {err}")));
            }
        };

        let products = match self.command.replace_all(&items).await {
            Ok(products) => products,
            Err(err) => {
                error!("❌ Failed to seed database: {err:?}");
                tracing_ctx
                    .error(&self.metrics, method, "Failed to seed database")
                    .await;
                return Err(ServiceError::Internal(format!("Failed to seed database: {err}")));
            }
        };

        info!("✅ Seeded {} products", products.len());

        tracing_ctx
            .success(&self.metrics, method, "Database seeded successfully")
            .await;

        Ok(SeedResponse {
            message: "Database seeded successfully".to_string(),
            products: products.into_iter().map(ProductResponse::from).collect(),
        })
    }

    async fn import_catalog(&self, reset: bool) -> Result<ImportReport, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = TracingContext::start("catalog", "import_catalog");

        let items = match full_catalog() {
            Ok(items) => items,
            Err(err) => {
                error!("❌ Catalog data is unreadable: {err}");
                tracing_ctx
                    .error(&self.metrics, method, "Catalog data is unreadable")
                    .await;
                return Err(ServiceError::Internal(format!("Catalog data is unreadable: {err}")));
            }
        };

        let mut report = ImportReport::default();

        if reset {
            report.deleted = match self.command.delete_all_products().await {
                Ok(deleted) => deleted,
                Err(err) => {
                    error!("❌ Failed to clear products: {err:?}");
                    tracing_ctx
                        .error(&self.metrics, method, "Failed to clear products")
                        .await;
                    return Err(ServiceError::Repo(err));
                }
            };
            info!("🗑️ Deleted {} existing products", report.deleted);
        }

        for item in &items {
            match self.command.create_product(item).await {
                Ok(product) => {
                    info!("➕ Added {}", product.name);
                    report.inserted += 1;
                }
                Err(err) => {
                    warn!("⚠️ Skipped {}: {err}", item.name);
                    report.failed.push(item.name.clone());
                }
            }
        }

        info!(
            "📦 Import finished | inserted={} failed={}",
            report.inserted,
            report.failed.len()
        );

        tracing_ctx
            .success(&self.metrics, method, "Catalog imported")
            .await;

        Ok(report)
    }

    async fn retag(&self) -> Result<TagReport, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = TracingContext::start("catalog", "retag_products");

        if let Err(err) = self.command.reset_tags().await {
            error!("❌ Failed to reset tags: {err:?}");
            tracing_ctx
                .error(&self.metrics, method, "Failed to reset tags")
                .await;
            return Err(ServiceError::Repo(err));
        }

        let products = match self.query.find_every().await {
            Ok(products) => products,
            Err(err) => {
                error!("❌ Failed to load products: {err:?}");
                tracing_ctx
                    .error(&self.metrics, method, "Failed to load products")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        let plan = self.plan(&products);

        let result = async {
            self.command.mark_featured(&plan.featured).await?;
            self.command.mark_new(&plan.is_new).await?;
            for sale in &plan.on_sale {
                self.command.mark_on_sale(sale).await?;
            }
            Ok::<_, RepositoryError>(())
        }
        .await;

        if let Err(err) = result {
            error!("❌ Failed to apply tags: {err:?}");
            tracing_ctx
                .error(&self.metrics, method, "Failed to apply tags")
                .await;
            return Err(ServiceError::Repo(err));
        }

        let report = TagReport {
            total: products.len(),
            featured: plan.featured.len(),
            is_new: plan.is_new.len(),
            on_sale: plan.on_sale.len(),
        };

        info!(
            "🏷️ Tagged {} products | featured={} new={} sale={}",
            report.total, report.featured, report.is_new, report.on_sale
        );

        tracing_ctx
            .success(&self.metrics, method, "Products tagged")
            .await;

        Ok(report)
    }
}
