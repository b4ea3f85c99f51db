use std::sync::Arc;

use bigdecimal::BigDecimal;

/// Read-only lookup of article prices.
///
/// `None` from `list_price` means the article is unknown; `None` from
/// `customer_price` means no special price is defined for that customer.
pub trait PriceSource: Send + Sync + 'static {
    fn list_price(&self, article_id: &str) -> Option<BigDecimal>;
    fn customer_price(&self, article_id: &str, customer_id: &str) -> Option<BigDecimal>;
}

impl<S: PriceSource + ?Sized> PriceSource for Arc<S> {
    fn list_price(&self, article_id: &str) -> Option<BigDecimal> {
        (**self).list_price(article_id)
    }

    fn customer_price(&self, article_id: &str, customer_id: &str) -> Option<BigDecimal> {
        (**self).customer_price(article_id, customer_id)
    }
}
