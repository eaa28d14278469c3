mod auth;
mod product;

pub use self::auth::{CreateUserRecord, LoginRequest, RegisterRequest};
pub use self::product::{
    CreateProductRequest, DEFAULT_PAGE_SIZE, FindAllProductsQuery, MAX_PAGE_SIZE, ProductFilter,
    SortOrder, UpdateProductRequest,
};
