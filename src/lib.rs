pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::basket_calculator::BasketCalculator;
use config::AppConfig;
use domain::ports::PriceSource;
use errors::AppError;
use infrastructure::price_repo::InMemoryPriceRepository;

/// Calculator over a type-erased price source, as stored in the app data.
pub type SharedCalculator = BasketCalculator<Arc<dyn PriceSource>>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::calculator::calculate_basket,
        handlers::calculator::get_article_price,
        handlers::calculator::get_customer_article_price,
    ),
    components(schemas(
        handlers::calculator::BasketRequest,
        handlers::calculator::BasketEntryRequest,
        handlers::calculator::BasketCalculationResponse,
    )),
    tags((name = "calculator", description = "Basket and article price calculation"))
)]
pub struct ApiDoc;

/// Build the price catalogue described by `config`.
pub fn price_source_from_config(config: &AppConfig) -> InMemoryPriceRepository {
    if config.generate_missing_prices {
        InMemoryPriceRepository::generating(config.discounts.clone(), config.price_range)
    } else {
        InMemoryPriceRepository::new(config.discounts.clone())
    }
}

pub fn shared_calculator<S: PriceSource>(source: S) -> SharedCalculator {
    BasketCalculator::new(Arc::new(source) as Arc<dyn PriceSource>)
}

/// Register the calculator routes. Expects a `web::Data<SharedCalculator>`
/// to be present in the app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/calculator")
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
            )
            .route(
                "/calculate-basket",
                web::post().to(handlers::calculator::calculate_basket),
            )
            .route(
                "/article/{article_id}",
                web::get().to(handlers::calculator::get_article_price),
            )
            .route(
                "/article/{article_id}/price",
                web::get().to(handlers::calculator::get_customer_article_price),
            ),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    calculator: SharedCalculator,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let calculator = web::Data::new(calculator);
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(calculator.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
