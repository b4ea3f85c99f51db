use std::collections::HashMap;

use bigdecimal::{BigDecimal, RoundingMode};

/// Scale customer prices are rounded to.
pub const PRICE_SCALE: i64 = 2;

/// Percentage discounts off the list price, keyed by customer id.
///
/// Customers without an entry get no discount, which is a normal outcome and
/// surfaces as `None` from [`DiscountPolicy::apply`].
#[derive(Debug, Clone, Default)]
pub struct DiscountPolicy {
    rates: HashMap<String, BigDecimal>,
}

impl DiscountPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two discounted customer classes the calculator ships with.
    pub fn standard() -> Self {
        Self::new()
            .with_rate("customer-1", BigDecimal::new(10.into(), 2))
            .with_rate("customer-2", BigDecimal::new(15.into(), 2))
    }

    pub fn with_rate(mut self, customer_id: impl Into<String>, rate: BigDecimal) -> Self {
        self.rates.insert(customer_id.into(), rate);
        self
    }

    pub fn rate_for(&self, customer_id: &str) -> Option<&BigDecimal> {
        self.rates.get(customer_id)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// `list_price * (1 - rate)`, rounded half-up to two decimals.
    pub fn apply(&self, list_price: &BigDecimal, customer_id: &str) -> Option<BigDecimal> {
        let rate = self.rate_for(customer_id)?;
        let factor = BigDecimal::from(1) - rate;
        Some((list_price * &factor).with_scale_round(PRICE_SCALE, RoundingMode::HalfUp))
    }
}
