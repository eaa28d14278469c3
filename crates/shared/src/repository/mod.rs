mod product;
mod user;

#[cfg(any(test, feature = "test-util"))]
mod memory;

pub use self::product::{ProductCommandRepository, ProductQueryRepository, ProductRepository};
pub use self::user::{UserCommandRepository, UserQueryRepository, UserRepository};

#[cfg(any(test, feature = "test-util"))]
pub use self::memory::MemoryStore;
