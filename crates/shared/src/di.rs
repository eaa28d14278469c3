use crate::{
    abstract_trait::{DynCatalogService, DynHashing, DynHomeService, DynJwtService},
    config::ConnectionPool,
    repository::{ProductRepository, UserRepository},
    service::{
        AuthService, AuthServiceDeps, CatalogService, CatalogServiceDeps, HomeService,
        ProductService,
    },
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: AuthService,
    pub product_service: ProductService,
    pub home_service: DynHomeService,
    pub catalog_service: DynCatalogService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("product_service", &"<ProductService>")
            .field("home_service", &"<HomeService>")
            .field("catalog_service", &"<CatalogService>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub products: ProductRepository,
    pub users: UserRepository,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
    pub rng_seed: Option<u64>,
}

impl DependenciesInjectDeps {
    pub fn from_pool(
        pool: ConnectionPool,
        hash: DynHashing,
        jwt_config: DynJwtService,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        Self {
            products: ProductRepository::new(pool.clone()),
            users: UserRepository::new(pool),
            hash,
            jwt_config,
            registry,
            rng_seed: None,
        }
    }
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            products,
            users,
            hash,
            jwt_config,
            registry,
            rng_seed,
        } = deps;

        let product_service = ProductService::new(
            products.query.clone(),
            products.command.clone(),
            registry.clone(),
        )
        .await;

        let home_service =
            Arc::new(HomeService::new(products.query.clone(), registry.clone()).await)
                as DynHomeService;

        let catalog_service = Arc::new(
            CatalogService::new(CatalogServiceDeps {
                query: products.query.clone(),
                command: products.command.clone(),
                registry: registry.clone(),
                rng_seed,
            })
            .await,
        ) as DynCatalogService;

        let auth_service = AuthService::new(AuthServiceDeps {
            hash,
            jwt: jwt_config,
            user_query: users.query.clone(),
            user_command: users.command.clone(),
            registry: registry.clone(),
        })
        .await;

        Self {
            auth_service,
            product_service,
            home_service,
            catalog_service,
        }
    }
}
