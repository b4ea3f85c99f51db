use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use bigdecimal::BigDecimal;
use rand::Rng;

use crate::domain::discount::{DiscountPolicy, PRICE_SCALE};
use crate::domain::ports::PriceSource;

/// Bounds, in cents, for list prices invented for unknown articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min_cents: i64,
    pub max_cents: i64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min_cents: 50,
            max_cents: 3000,
        }
    }
}

impl PriceRange {
    fn sample(&self) -> BigDecimal {
        let cents = rand::thread_rng().gen_range(self.min_cents..=self.max_cents);
        BigDecimal::new(cents.into(), PRICE_SCALE)
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// In-process price catalogue shared by every request.
///
/// List prices live behind a `RwLock`. With generation enabled an unknown
/// article gets a random list price on first lookup; the insert happens under
/// the write lock, so racing first lookups all observe the same stored value.
pub struct InMemoryPriceRepository {
    prices: RwLock<HashMap<String, BigDecimal>>,
    discounts: DiscountPolicy,
    generate_missing: Option<PriceRange>,
}

impl InMemoryPriceRepository {
    /// Catalogue that only knows the prices it is given.
    pub fn new(discounts: DiscountPolicy) -> Self {
        Self {
            prices: RwLock::new(HashMap::new()),
            discounts,
            generate_missing: None,
        }
    }

    /// Catalogue that invents a list price within `range` for unknown articles.
    pub fn generating(discounts: DiscountPolicy, range: PriceRange) -> Self {
        Self {
            generate_missing: Some(range),
            ..Self::new(discounts)
        }
    }

    pub fn with_price(self, article_id: impl Into<String>, price: BigDecimal) -> Self {
        self.set_price(article_id, price);
        self
    }

    pub fn set_price(&self, article_id: impl Into<String>, price: BigDecimal) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(article_id.into(), price);
    }

    pub fn len(&self) -> usize {
        self.prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stored_price(&self, article_id: &str) -> Option<BigDecimal> {
        self.prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(article_id)
            .cloned()
    }
}

impl PriceSource for InMemoryPriceRepository {
    fn list_price(&self, article_id: &str) -> Option<BigDecimal> {
        if let Some(price) = self.stored_price(article_id) {
            return Some(price);
        }

        let range = self.generate_missing?;
        let mut prices = self.prices.write().unwrap_or_else(PoisonError::into_inner);
        let price = prices
            .entry(article_id.to_string())
            .or_insert_with(|| {
                let price = range.sample();
                log::debug!("generated list price {} for article {}", price, article_id);
                price
            })
            .clone();
        Some(price)
    }

    fn customer_price(&self, article_id: &str, customer_id: &str) -> Option<BigDecimal> {
        self.discounts.rate_for(customer_id)?;
        let list_price = self.list_price(article_id)?;
        self.discounts.apply(&list_price, customer_id)
    }
}
