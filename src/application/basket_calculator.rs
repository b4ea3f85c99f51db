use std::collections::BTreeMap;

use bigdecimal::BigDecimal;

use crate::domain::basket::{Basket, BasketCalculationResult};
use crate::domain::errors::DomainError;
use crate::domain::ports::PriceSource;

use super::pricing_resolver::PricingResolver;

pub struct BasketCalculator<S> {
    resolver: PricingResolver<S>,
}

impl<S: PriceSource> BasketCalculator<S> {
    pub fn new(source: S) -> Self {
        Self {
            resolver: PricingResolver::new(source),
        }
    }

    pub fn resolver(&self) -> &PricingResolver<S> {
        &self.resolver
    }

    /// Prices every entry of `basket` and sums the line prices.
    ///
    /// Entries are priced in `(article_id, quantity)` order and the first
    /// unresolvable one aborts the calculation. When two entries share an
    /// article id the later one owns that key in `priced_basket_entries`,
    /// while `total_amount` still counts both lines.
    pub fn calculate_basket(&self, basket: &Basket) -> Result<BasketCalculationResult, DomainError> {
        let customer_id = basket.customer_id.as_deref();
        let mut priced_basket_entries = BTreeMap::new();
        let mut total_amount = BigDecimal::from(0);

        for entry in &basket.entries {
            let line_price = self.resolver.resolve_line_price(entry, customer_id)?;
            total_amount += &line_price;
            priced_basket_entries.insert(entry.article_id.clone(), line_price);
        }

        log::info!(
            "calculated basket with {} entries for customer {:?}: total {}",
            basket.entries.len(),
            customer_id,
            total_amount
        );

        Ok(BasketCalculationResult {
            customer_id: basket.customer_id.clone(),
            priced_basket_entries,
            total_amount,
        })
    }

    pub fn resolve_article_price(
        &self,
        article_id: &str,
        customer_id: Option<&str>,
    ) -> Result<BigDecimal, DomainError> {
        self.resolver.resolve_unit_price(article_id, customer_id)
    }
}
