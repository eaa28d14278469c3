mod api;
mod catalog;
mod home;
mod product;
mod token;
mod user;

pub use self::api::{ApiResponse, MessageResponse};
pub use self::catalog::{ImportReport, SeedResponse, TagReport};
pub use self::home::{CatalogSummary, HomeResponse};
pub use self::product::{
    ProductDetailResponse, ProductFacetsResponse, ProductResponse, ProductsResponse,
    ReviewResponse, ReviewerResponse,
};
pub use self::token::LoginResponse;
pub use self::user::UserResponse;
