use crate::{
    abstract_trait::{DynHashing, DynJwtService, DynUserQueryRepository, LoginServiceTrait},
    domain::{
        requests::LoginRequest,
        responses::{ApiResponse, LoginResponse, UserResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub struct LoginService {
    query: DynUserQueryRepository,
    hash: DynHashing,
    jwt: DynJwtService,
    metrics: Arc<Mutex<Metrics>>,
}

pub struct LoginServiceDeps {
    pub query: DynUserQueryRepository,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub metrics: Arc<Mutex<Metrics>>,
    pub registry: Arc<Mutex<Registry>>,
}

impl LoginService {
    pub async fn new(deps: LoginServiceDeps) -> Self {
        let LoginServiceDeps {
            query,
            hash,
            jwt,
            metrics,
            registry,
        } = deps;

        metrics
            .lock()
            .await
            .register(&mut *registry.lock().await, "login_service", "LoginService");

        Self {
            query,
            hash,
            jwt,
            metrics,
        }
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<LoginResponse>, ServiceError> {
        info!("🔐 [LOGIN] Attempting login for {}", req.email);

        let method = Method::Post;
        let tracing_ctx = TracingContext::start("auth", "login_user");

        let user = match self.query.find_by_email(&req.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("🚫 [LOGIN] Unknown email: {}", req.email);
                tracing_ctx
                    .error(&self.metrics, method, "Invalid credentials")
                    .await;
                return Err(ServiceError::InvalidCredentials);
            }
            Err(err) => {
                error!("❌ [LOGIN] Failed to look up {}: {err:?}", req.email);
                tracing_ctx
                    .error(&self.metrics, method, "Failed to look up user")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        if let Err(err) = self.hash.compare_password(&user.password, &req.password).await {
            warn!("🚫 [LOGIN] Wrong password for {}", req.email);
            tracing_ctx
                .error(&self.metrics, method, "Invalid credentials")
                .await;
            return Err(match err {
                ServiceError::Bcrypt(_) => ServiceError::InvalidCredentials,
                other => other,
            });
        }

        let token = match self.jwt.generate_token(user.id, user.role) {
            Ok(token) => token,
            Err(err) => {
                error!("❌ [LOGIN] Failed to issue token for {}: {err:?}", user.id);
                tracing_ctx
                    .error(&self.metrics, method, "Failed to issue token")
                    .await;
                return Err(err);
            }
        };

        info!("✅ [LOGIN] {} logged in as {}", user.email, user.role);

        tracing_ctx
            .success(&self.metrics, method, "Login successful")
            .await;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Login successful".to_string(),
            data: LoginResponse {
                token,
                user: UserResponse::from(user),
            },
        })
    }
}
