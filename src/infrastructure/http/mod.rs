//! HTTP REST API routes

mod error;
mod game_routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::infrastructure::config::ServerConfig;
use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/v1/games",
            get(game_routes::list_games).post(game_routes::generate_game),
        )
        .route(
            "/api/v1/games/{id}",
            get(game_routes::get_game).delete(game_routes::delete_game),
        )
        .route(
            "/api/v1/games/{id}/sheet",
            get(game_routes::render_card_sheet),
        )
        .route("/api/v1/cards/{id}", delete(game_routes::delete_card))
}

/// The full application: health check, API, rendered files, CORS and tracing
pub fn create_app(state: Arc<AppState>) -> Result<Router> {
    let cors = cors_layer(&state.config.server)?;
    let files = ServeDir::new(&state.config.storage.files_dir);

    Ok(Router::new()
        .route("/health", get(health_check))
        .merge(create_routes())
        .nest_service("/files", files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn health_check() -> &'static str {
    "OK"
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.cors_origin == "*" {
        return Ok(layer.allow_origin(Any));
    }
    let origin = HeaderValue::from_str(&config.cors_origin)
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;
    Ok(layer.allow_origin(origin))
}
