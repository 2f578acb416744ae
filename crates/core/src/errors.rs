use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate product id `{id}`")]
    DuplicateId { id: String },
    #[error("product at position {position} has an empty id")]
    EmptyId { position: usize },
    #[error("product `{id}` has an empty name")]
    EmptyName { id: String },
    #[error("product `{id}` has a negative price: {price}")]
    NegativePrice { id: String, price: Decimal },
}
