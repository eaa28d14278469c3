use chrono::Duration;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{Config, ConnectionPool, Hashing, JwtConfig},
    di::{DependenciesInject, DependenciesInjectDeps},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("jwt_config", &"<dyn JwtService>")
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Self {
        let jwt_config = Arc::new(
            JwtConfig::new(&config.jwt_secret).with_ttl(Duration::hours(config.jwt_ttl_hours)),
        ) as DynJwtService;
        let hashing = Arc::new(Hashing::new()) as DynHashing;
        let registry = Arc::new(Mutex::new(Registry::default()));

        let deps =
            DependenciesInjectDeps::from_pool(pool, hashing, jwt_config.clone(), registry.clone());

        Self::from_deps(deps).await
    }

    /// Builds the state from explicit dependencies, e.g. in-memory repositories.
    pub async fn from_deps(deps: DependenciesInjectDeps) -> Self {
        let jwt_config = deps.jwt_config.clone();
        let registry = deps.registry.clone();
        let di_container = DependenciesInject::new(deps).await;

        Self {
            di_container,
            jwt_config,
            registry,
        }
    }
}
