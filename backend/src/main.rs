mod config;
mod routes;
mod upstream;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::GatewayConfig;
use routes::configure_routes;
use upstream::UpstreamClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = GatewayConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let upstream = UpstreamClient::new(config.upstream_url.clone(), config.upstream_timeout)
        .map_err(|e| {
            log::error!("Failed to build upstream client: {}", e);
            std::io::Error::other(e.to_string())
        })?;

    log::info!("Relaying validation requests to {}", config.upstream_url);
    log::info!("Serving frontend from {}", config.frontend_dir);
    log::info!("Starting server on {}", config.bind_address);

    let frontend_dir = config.frontend_dir.clone();
    let max_body_bytes = config.max_body_bytes;

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::JsonConfig::default().limit(max_body_bytes))
            .app_data(web::Data::new(upstream.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
