use crate::{
    abstract_trait::{DynProductCommandRepository, ProductCommandServiceTrait},
    domain::{
        requests::UpdateProductRequest,
        responses::{MessageResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    service::product::parse_product_id,
    utils::{Method, Metrics, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use validator::Validate;

pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    pub metrics: Arc<Mutex<Metrics>>,
}

impl ProductCommandService {
    pub async fn new(
        command: DynProductCommandRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        metrics.lock().await.register(
            &mut *registry.lock().await,
            "product_command_service",
            "ProductCommandService",
        );

        Self { command, metrics }
    }
}

fn not_found_or_repo(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound("Product".to_string()),
        other => ServiceError::Repo(other),
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("✏️ Updating product with ID: {id}");

        let method = Method::Put;
        let tracing_ctx = TracingContext::start("product", "update_product");

        let product_id = match parse_product_id(id) {
            Ok(product_id) => product_id,
            Err(err) => {
                tracing_ctx
                    .error(&self.metrics, method, "Invalid product ID")
                    .await;
                return Err(err);
            }
        };

        if let Err(errors) = req.validate() {
            let messages = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{field} is invalid"))
                    })
                })
                .collect::<Vec<_>>();
            tracing_ctx
                .error(&self.metrics, method, "Missing required fields")
                .await;
            return Err(ServiceError::Validation(messages));
        }

        let product = match self.command.update_product(product_id, req).await {
            Ok(product) => product,
            Err(err) => {
                error!("❌ Failed to update product {product_id}: {err:?}");
                tracing_ctx
                    .error(&self.metrics, method, "Failed to update product")
                    .await;
                return Err(not_found_or_repo(err));
            }
        };

        info!("✅ Product updated successfully: {} (ID: {})", product.name, product.id);

        tracing_ctx
            .success(&self.metrics, method, "Product updated successfully")
            .await;

        Ok(ProductResponse::from(product))
    }

    async fn delete_product(&self, id: &str) -> Result<MessageResponse, ServiceError> {
        info!("💀 Deleting product with ID: {id}");

        let method = Method::Delete;
        let tracing_ctx = TracingContext::start("product", "delete_product");

        let product_id = match parse_product_id(id) {
            Ok(product_id) => product_id,
            Err(err) => {
                tracing_ctx
                    .error(&self.metrics, method, "Invalid product ID")
                    .await;
                return Err(err);
            }
        };

        if let Err(err) = self.command.delete_product(product_id).await {
            error!("❌ Failed to delete product {product_id}: {err:?}");
            tracing_ctx
                .error(&self.metrics, method, "Failed to delete product")
                .await;
            return Err(not_found_or_repo(err));
        }

        tracing_ctx
            .success(&self.metrics, method, "Product deleted successfully")
            .await;

        Ok(MessageResponse::success("Product deleted successfully"))
    }
}
