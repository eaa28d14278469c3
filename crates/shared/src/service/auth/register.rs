use crate::{
    abstract_trait::{DynHashing, DynUserCommandRepository, RegisterServiceTrait},
    domain::{
        requests::{CreateUserRecord, RegisterRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct RegisterService {
    command: DynUserCommandRepository,
    hash: DynHashing,
    metrics: Arc<Mutex<Metrics>>,
}

pub struct RegisterServiceDeps {
    pub command: DynUserCommandRepository,
    pub hash: DynHashing,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

impl RegisterService {
    pub async fn new(deps: RegisterServiceDeps) -> Self {
        let RegisterServiceDeps {
            command,
            hash,
            metrics,
            registry,
        } = deps;

        metrics.lock().await.register(
            &mut *registry.lock().await,
            "register_service",
            "RegisterService",
        );

        Self {
            command,
            hash,
            metrics,
        }
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let email = req.email.trim().to_lowercase();
        info!("📝 [REGISTER] Registering {email}");

        let method = Method::Post;
        let tracing_ctx = TracingContext::start("auth", "register_user");

        let password_hash = match self.hash.hash_password(&req.password).await {
            Ok(hash) => hash,
            Err(err) => {
                error!("❌ [REGISTER] Failed to hash password for {email}: {err:?}");
                tracing_ctx
                    .error(&self.metrics, method, "Failed to hash password")
                    .await;
                return Err(err);
            }
        };

        let record = CreateUserRecord {
            name: req.name.trim().to_string(),
            email: email.clone(),
            password_hash,
        };

        let user = match self.command.create_user(&record).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists(msg)) => {
                info!("⚠️ [REGISTER] Email already taken: {email}");
                tracing_ctx
                    .error(&self.metrics, method, "Email already registered")
                    .await;
                return Err(ServiceError::Repo(RepositoryError::AlreadyExists(msg)));
            }
            Err(err) => {
                error!("❌ [REGISTER] Failed to create user {email}: {err:?}");
                tracing_ctx
                    .error(&self.metrics, method, "Failed to create user")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        info!("✅ [REGISTER] Registered user {} ({})", user.email, user.id);

        tracing_ctx
            .success(&self.metrics, method, "User registered successfully")
            .await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "User registered successfully".to_string(),
            data: UserResponse::from(user),
        })
    }
}
