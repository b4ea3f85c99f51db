use std::collections::BTreeMap;
use std::str::FromStr;

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::basket::{Basket, BasketCalculationResult, BasketEntry};
use crate::errors::AppError;
use crate::SharedCalculator;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasketEntryRequest {
    pub article_id: String,
    /// Decimal quantity, either a JSON number or a string such as "1.5".
    #[serde(deserialize_with = "deserialize_decimal")]
    #[schema(value_type = String, example = "2")]
    pub quantity: BigDecimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasketRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub entries: Vec<BasketEntryRequest>,
}

impl BasketRequest {
    /// Reject baskets the calculator should never see: no entries, or an
    /// entry without an article id.
    pub fn into_basket(self) -> Result<Basket, AppError> {
        if self.entries.is_empty() {
            return Err(AppError::BadRequest(
                "Basket must contain at least one entry".to_string(),
            ));
        }
        if self.entries.iter().any(|e| e.article_id.trim().is_empty()) {
            return Err(AppError::BadRequest(
                "Article ID must not be blank".to_string(),
            ));
        }

        Ok(Basket::new(
            self.customer_id,
            self.entries
                .into_iter()
                .map(|e| BasketEntry::new(e.article_id, e.quantity)),
        ))
    }
}

/// Prices are rendered as decimal strings, e.g. "30.29".
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasketCalculationResponse {
    pub customer_id: Option<String>,
    pub priced_basket_entries: BTreeMap<String, String>,
    pub total_amount: String,
}

impl From<BasketCalculationResult> for BasketCalculationResponse {
    fn from(result: BasketCalculationResult) -> Self {
        Self {
            customer_id: result.customer_id,
            priced_basket_entries: result
                .priced_basket_entries
                .into_iter()
                .map(|(article_id, price)| (article_id, price.to_string()))
                .collect(),
            total_amount: result.total_amount.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerQuery {
    /// Customer whose special price should be preferred.
    pub customer_id: Option<String>,
}

// With `arbitrary_precision` a JSON number keeps the exact text it was sent
// with, so `1.10` and long fractions reach `BigDecimal` unchanged.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s,
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected a decimal number or string, got {}",
                other
            )))
        }
    };
    BigDecimal::from_str(text.trim()).map_err(serde::de::Error::custom)
}

fn decimal_response(price: &BigDecimal) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(price.to_string())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /calculator/calculate-basket
///
/// Prices every entry of the basket and returns the per-article line prices
/// together with the basket total.
#[utoipa::path(
    post,
    path = "/calculator/calculate-basket",
    request_body = BasketRequest,
    responses(
        (status = 200, description = "Basket priced", body = BasketCalculationResponse),
        (status = 400, description = "Basket is empty or malformed"),
        (status = 404, description = "No price for one of the articles"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "calculator"
)]
pub async fn calculate_basket(
    calculator: web::Data<SharedCalculator>,
    body: web::Json<BasketRequest>,
) -> Result<HttpResponse, AppError> {
    let basket = body.into_inner().into_basket()?;
    let result = calculator.calculate_basket(&basket)?;

    Ok(HttpResponse::Ok().json(BasketCalculationResponse::from(result)))
}

/// GET /calculator/article/{article_id}
///
/// Returns the list price of a single article as a bare decimal.
#[utoipa::path(
    get,
    path = "/calculator/article/{article_id}",
    params(
        ("article_id" = String, Path, description = "Article identifier"),
    ),
    responses(
        (status = 200, description = "List price", body = String),
        (status = 404, description = "No price for the article"),
    ),
    tag = "calculator"
)]
pub async fn get_article_price(
    calculator: web::Data<SharedCalculator>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let article_id = path.into_inner();
    let price = calculator.resolve_article_price(&article_id, None)?;

    Ok(decimal_response(&price))
}

/// GET /calculator/article/{article_id}/price?customerId=..
///
/// Returns the price a customer pays for one unit of the article, falling
/// back to the list price when the customer has no special price.
#[utoipa::path(
    get,
    path = "/calculator/article/{article_id}/price",
    params(
        ("article_id" = String, Path, description = "Article identifier"),
        CustomerQuery,
    ),
    responses(
        (status = 200, description = "Customer or list price", body = String),
        (status = 404, description = "No price for the article"),
    ),
    tag = "calculator"
)]
pub async fn get_customer_article_price(
    calculator: web::Data<SharedCalculator>,
    path: web::Path<String>,
    query: web::Query<CustomerQuery>,
) -> Result<HttpResponse, AppError> {
    let article_id = path.into_inner();
    let customer_id = query.into_inner().customer_id;
    let price = calculator.resolve_article_price(&article_id, customer_id.as_deref())?;

    Ok(decimal_response(&price))
}
