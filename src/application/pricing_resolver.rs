use bigdecimal::BigDecimal;

use crate::domain::basket::BasketEntry;
use crate::domain::errors::DomainError;
use crate::domain::ports::PriceSource;

/// Decides the effective unit price of an article for an optional customer.
///
/// A customer-specific price always wins when one is defined; otherwise the
/// list price is used. Nothing is cached here, every call reads the source.
pub struct PricingResolver<S> {
    source: S,
}

impl<S: PriceSource> PricingResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn resolve_unit_price(
        &self,
        article_id: &str,
        customer_id: Option<&str>,
    ) -> Result<BigDecimal, DomainError> {
        if let Some(customer_id) = customer_id {
            if let Some(price) = self.source.customer_price(article_id, customer_id) {
                log::debug!(
                    "customer price {} for article {} (customer {})",
                    price,
                    article_id,
                    customer_id
                );
                return Ok(price);
            }
        }

        match self.source.list_price(article_id) {
            Some(price) => {
                log::debug!("list price {} for article {}", price, article_id);
                Ok(price)
            }
            None => {
                log::warn!("no price available for article {}", article_id);
                Err(DomainError::PriceNotFound(article_id.to_string()))
            }
        }
    }

    /// Unit price times quantity, without any rounding.
    pub fn resolve_line_price(
        &self,
        entry: &BasketEntry,
        customer_id: Option<&str>,
    ) -> Result<BigDecimal, DomainError> {
        let unit_price = self.resolve_unit_price(&entry.article_id, customer_id)?;
        Ok(unit_price * &entry.quantity)
    }
}
