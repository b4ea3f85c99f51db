use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use bigdecimal::BigDecimal;

/// One article and the quantity requested for it.
///
/// Ordering is by `(article_id, quantity)`, which is also the order in which a
/// basket's entries are priced. Quantities that are numerically equal but
/// written with a different scale (`2` and `2.00`) are distinct entries, the
/// lower scale sorting first.
#[derive(Debug, Clone)]
pub struct BasketEntry {
    pub article_id: String,
    pub quantity: BigDecimal,
}

impl BasketEntry {
    pub fn new(article_id: impl Into<String>, quantity: BigDecimal) -> Self {
        Self {
            article_id: article_id.into(),
            quantity,
        }
    }
}

impl Ord for BasketEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.article_id
            .cmp(&other.article_id)
            .then_with(|| self.quantity.cmp(&other.quantity))
            .then_with(|| scale(&self.quantity).cmp(&scale(&other.quantity)))
    }
}

impl PartialOrd for BasketEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BasketEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BasketEntry {}

impl Hash for BasketEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.article_id.hash(state);
        self.quantity.hash(state);
        scale(&self.quantity).hash(state);
    }
}

fn scale(value: &BigDecimal) -> i64 {
    value.as_bigint_and_exponent().1
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    pub customer_id: Option<String>,
    pub entries: BTreeSet<BasketEntry>,
}

impl Basket {
    pub fn new<I>(customer_id: Option<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = BasketEntry>,
    {
        Self {
            customer_id,
            entries: entries.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketCalculationResult {
    pub customer_id: Option<String>,
    pub priced_basket_entries: BTreeMap<String, BigDecimal>,
    pub total_amount: BigDecimal,
}
