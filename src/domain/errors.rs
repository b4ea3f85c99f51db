use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Price not found for article: {0}")]
    PriceNotFound(String),
}
