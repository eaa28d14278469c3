mod auth;
mod catalog;
mod home;
mod product;

pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::catalog::{CatalogService, CatalogServiceDeps};
pub use self::home::HomeService;
pub use self::product::{ProductCommandService, ProductQueryService, ProductService};
