use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use anyhow::Context;
use recruit_ai_api::infrastructure::config::Config;
use recruit_ai_api::infrastructure::gemini::GeminiClient;
use recruit_ai_api::infrastructure::logging::init_logging;
use recruit_ai_api::presentation::handlers::{AppState, CookieSettings};
use recruit_ai_api::presentation::middleware::{
    JwtAuthMiddleware, RequestIdMiddleware, TimingMiddleware,
};
use recruit_ai_api::presentation::routes::{ROUTES, configure_routes};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_logging(&config.log_level);
    info!("Starting recruit AI API v{}", env!("CARGO_PKG_VERSION"));

    let ai = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())
        .context("Failed to build Gemini HTTP client")?;
    info!(model = %config.gemini_model, "Gemini client initialized");

    let state = web::Data::new(AppState::in_memory(
        Arc::new(ai),
        config.jwt_secret.clone(),
        config.jwt_ttl_secs(),
        CookieSettings {
            secure: config.cookie_secure,
            max_age_hours: config.cookie_max_age_hours,
        },
    ));
    info!("Application state initialized");

    let jwt_secret = config.jwt_secret.clone();
    let client_url = config.client_url.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&client_url)
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .configure(configure_routes)
    });

    let bind_addr = format!("{}:{}", config.host, config.port);
    let server = server
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    info!(address = %bind_addr, routes = %ROUTES, "Starting HTTP server");
    server.run().await?;
    Ok(())
}
