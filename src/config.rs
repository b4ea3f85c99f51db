use std::str::FromStr;

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::domain::discount::DiscountPolicy;
use crate::infrastructure::price_repo::PriceRange;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub generate_missing_prices: bool,
    pub price_range: PriceRange,
    pub discounts: DiscountPolicy,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup; unset keys fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 8080u16)?;
        let generate_missing_prices = match lookup("GENERATE_MISSING_PRICES") {
            Some(value) => parse_bool("GENERATE_MISSING_PRICES", &value)?,
            None => true,
        };

        let defaults = PriceRange::default();
        let price_range = PriceRange {
            min_cents: parse_or("PRICE_MIN_CENTS", lookup("PRICE_MIN_CENTS"), defaults.min_cents)?,
            max_cents: parse_or("PRICE_MAX_CENTS", lookup("PRICE_MAX_CENTS"), defaults.max_cents)?,
        };
        if price_range.min_cents < 0 || price_range.min_cents > price_range.max_cents {
            return Err(ConfigError::invalid(
                "PRICE_MIN_CENTS",
                &price_range.min_cents.to_string(),
                format!("must be between 0 and PRICE_MAX_CENTS ({})", price_range.max_cents),
            ));
        }

        let discounts = match lookup("CUSTOMER_DISCOUNTS") {
            Some(value) => parse_discounts(&value)?,
            None => DiscountPolicy::standard(),
        };

        Ok(Self {
            host,
            port,
            generate_missing_prices,
            price_range,
            discounts,
        })
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(name, &v, e.to_string())),
        None => Ok(default),
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(name, value, "expected true or false")),
    }
}

/// Parse `customer-1=0.10,customer-2=0.15`. An empty string disables all
/// discounts.
pub fn parse_discounts(value: &str) -> Result<DiscountPolicy, ConfigError> {
    const NAME: &str = "CUSTOMER_DISCOUNTS";
    let zero = BigDecimal::from(0);
    let one = BigDecimal::from(1);

    let mut policy = DiscountPolicy::new();
    for pair in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((customer_id, rate)) = pair.split_once('=') else {
            return Err(ConfigError::invalid(NAME, pair, "expected <customer>=<rate>"));
        };
        let customer_id = customer_id.trim();
        if customer_id.is_empty() {
            return Err(ConfigError::invalid(NAME, pair, "customer id is empty"));
        }
        let rate = BigDecimal::from_str(rate.trim())
            .map_err(|e| ConfigError::invalid(NAME, pair, e.to_string()))?;
        if rate < zero || rate > one {
            return Err(ConfigError::invalid(NAME, pair, "rate must be between 0 and 1"));
        }
        policy = policy.with_rate(customer_id, rate);
    }
    Ok(policy)
}
