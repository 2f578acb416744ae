pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod query;

pub use catalog::{builtin_products, Catalog};
pub use domain::product::{Product, ProductId};
pub use errors::CatalogError;
pub use query::{FilterParams, ProductFilter, DEFAULT_LIMIT, MAX_LIMIT};
