mod identity;
mod login;
mod register;

pub use self::identity::{IdentityService, IdentityServiceDeps};
pub use self::login::{LoginService, LoginServiceDeps};
pub use self::register::{RegisterService, RegisterServiceDeps};

use crate::{
    abstract_trait::{
        DynHashing, DynIdentityService, DynJwtService, DynLoginService, DynRegisterService,
        DynUserCommandRepository, DynUserQueryRepository,
    },
    utils::Metrics,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AuthService {
    pub identity: DynIdentityService,
    pub login: DynLoginService,
    pub register: DynRegisterService,
}

#[derive(Clone)]
pub struct AuthServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let identity = Arc::new(
            IdentityService::new(IdentityServiceDeps {
                query: deps.user_query.clone(),
                metrics: Arc::new(Mutex::new(Metrics::new())),
                registry: deps.registry.clone(),
            })
            .await,
        ) as DynIdentityService;

        let login = Arc::new(
            LoginService::new(LoginServiceDeps {
                query: deps.user_query.clone(),
                hash: deps.hash.clone(),
                jwt: deps.jwt.clone(),
                metrics: Arc::new(Mutex::new(Metrics::new())),
                registry: deps.registry.clone(),
            })
            .await,
        ) as DynLoginService;

        let register = Arc::new(
            RegisterService::new(RegisterServiceDeps {
                command: deps.user_command.clone(),
                hash: deps.hash.clone(),
                metrics: Arc::new(Mutex::new(Metrics::new())),
                registry: deps.registry.clone(),
            })
            .await,
        ) as DynRegisterService;

        Self {
            identity,
            login,
            register,
        }
    }
}
