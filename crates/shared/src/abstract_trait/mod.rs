mod auth;
mod catalog;
mod hashing;
mod home;
mod jwt;
mod product;
mod user;

pub use self::auth::{
    DynIdentityService, DynLoginService, DynRegisterService, IdentityServiceTrait,
    LoginServiceTrait, RegisterServiceTrait,
};
pub use self::catalog::{CatalogServiceTrait, DynCatalogService};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::home::{DynHomeService, HomeServiceTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::user::{
    DynUserCommandRepository, DynUserQueryRepository, UserCommandRepositoryTrait,
    UserQueryRepositoryTrait,
};
