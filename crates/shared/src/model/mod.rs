mod product;
mod review;
mod user;

pub use self::product::{CatalogCounts, Category, Facets, Product, ProductRow};
pub use self::review::ReviewWithUser;
pub use self::user::{User, UserRole, UserRow};
