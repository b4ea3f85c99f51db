use dotenvy::dotenv;
use pricing_calculator::config::AppConfig;
use pricing_calculator::{build_server, price_source_from_config, shared_calculator};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let source = price_source_from_config(&config);
    log::info!(
        "Price catalogue ready (generate missing prices: {})",
        config.generate_missing_prices
    );

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(shared_calculator(source), &config.host, config.port)?.await
}
