//! Service-level tests for the `/calculator` routes, run in-process through
//! `actix_web::test` against a seeded in-memory price catalogue.

use std::str::FromStr;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use bigdecimal::BigDecimal;
use pricing_calculator::configure_routes;
use pricing_calculator::domain::discount::DiscountPolicy;
use pricing_calculator::infrastructure::price_repo::InMemoryPriceRepository;
use pricing_calculator::shared_calculator;
use serde_json::{json, Value};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("valid decimal")
}

fn catalogue() -> InMemoryPriceRepository {
    InMemoryPriceRepository::new(DiscountPolicy::standard())
        .with_price("article-1", dec("1.50"))
        .with_price("article-2", dec("0.29"))
        .with_price("article-3", dec("10"))
        .with_price("article-4", dec("34.29"))
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(shared_calculator(catalogue())))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn calculate_basket_with_customer_discount() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/calculator/calculate-basket")
        .set_json(json!({
            "customerId": "customer-1",
            "entries": [
                { "articleId": "article-1", "quantity": 2 },
                { "articleId": "article-2", "quantity": 1 },
                { "articleId": "article-3", "quantity": 3 }
            ]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["customerId"], "customer-1");
    assert_eq!(body["pricedBasketEntries"]["article-1"], "3.00");
    assert_eq!(body["pricedBasketEntries"]["article-2"], "0.29");
    // 10 * 0.90 = 9.00, times 3
    assert_eq!(body["pricedBasketEntries"]["article-3"], "27.00");
    assert_eq!(body["totalAmount"], "30.29");
}

#[actix_web::test]
async fn calculate_basket_without_customer_uses_list_prices() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/calculator/calculate-basket")
        .set_json(json!({
            "entries": [{ "articleId": "article-3", "quantity": "1.5" }]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["customerId"], Value::Null);
    assert_eq!(body["totalAmount"], "15.0");
}

#[actix_web::test]
async fn calculate_basket_unknown_article_is_404() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/calculator/calculate-basket")
        .set_json(json!({
            "customerId": "customer-1",
            "entries": [
                { "articleId": "article-1", "quantity": 1 },
                { "articleId": "article-404", "quantity": 1 }
            ]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Price not found for article: article-404");
}

#[actix_web::test]
async fn calculate_basket_without_entries_is_400() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/calculator/calculate-basket")
        .set_json(json!({ "customerId": "customer-1", "entries": [] }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn calculate_basket_with_blank_article_is_400() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/calculator/calculate-basket")
        .set_json(json!({
            "customerId": "customer-1",
            "entries": [{ "articleId": "", "quantity": 1 }]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn calculate_basket_with_missing_quantity_is_400() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/calculator/calculate-basket")
        .set_json(json!({ "entries": [{ "articleId": "article-1" }] }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn article_list_price_is_a_bare_decimal() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/calculator/article/article-4")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "34.29");
}

#[actix_web::test]
async fn article_customer_price_applies_discount() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/calculator/article/article-4/price?customerId=customer-1")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "30.86");
}

#[actix_web::test]
async fn article_price_for_customer_without_discount_is_list_price() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/calculator/article/article-4/price?customerId=customer-9")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "34.29");
}

#[actix_web::test]
async fn unknown_article_price_is_404() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/calculator/article/article-404/price?customerId=customer-1")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn numeric_quantity_keeps_trailing_zero_and_full_precision() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/calculator/calculate-basket")
        .insert_header(ContentType::json())
        .set_payload(
            r#"{"entries":[
                {"articleId":"article-3","quantity":1.10},
                {"articleId":"article-1","quantity":0.1234567890123456789}
            ]}"#,
        )
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["pricedBasketEntries"]["article-3"], "11.00");
    assert_eq!(
        body["pricedBasketEntries"]["article-1"],
        "0.185185183518518518350"
    );
    assert_eq!(body["totalAmount"], "11.185185183518518518350");
}
