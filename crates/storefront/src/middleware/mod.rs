pub mod guard;
pub mod jwt;
pub mod validate;
