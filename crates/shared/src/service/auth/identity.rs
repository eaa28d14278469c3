use crate::{
    abstract_trait::{DynUserQueryRepository, IdentityServiceTrait},
    domain::responses::{ApiResponse, UserResponse},
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

pub struct IdentityService {
    query: DynUserQueryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

pub struct IdentityServiceDeps {
    pub query: DynUserQueryRepository,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

impl IdentityService {
    pub async fn new(deps: IdentityServiceDeps) -> Self {
        let IdentityServiceDeps {
            query,
            metrics,
            registry,
        } = deps;

        metrics.lock().await.register(
            &mut *registry.lock().await,
            "identity_service",
            "IdentityService",
        );

        Self { query, metrics }
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn get_me(&self, user_id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("👤 Fetching profile for user {user_id}");

        let tracing_ctx = TracingContext::start("auth", "get_me");

        match self.query.find_by_id(user_id).await {
            Ok(Some(user)) => {
                tracing_ctx
                    .success(&self.metrics, Method::Get, "Profile retrieved")
                    .await;
                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "User profile retrieved".to_string(),
                    data: UserResponse::from(user),
                })
            }
            Ok(None) => {
                tracing_ctx
                    .error(&self.metrics, Method::Get, "User not found")
                    .await;
                Err(ServiceError::NotFound("User".to_string()))
            }
            Err(err) => {
                error!("❌ Failed to fetch user {user_id}: {err:?}");
                tracing_ctx
                    .error(&self.metrics, Method::Get, "Failed to fetch user")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }
}
