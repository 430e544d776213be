pub mod auth;
pub mod clients;
pub mod config;
pub mod errors;
mod http;
mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{Router, http::StatusCode, middleware as axum_middleware};
use middleware::{cors_layer, spawn_rate_limiter_cleanup, throttle_by_client};
use std::{net::SocketAddr, time::Duration};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, errors::AppError, state::AppState};

const RATE_LIMITER_CLEANUP_EVERY: Duration = Duration::from_secs(60);

/// Builds the gateway router with its middleware stack.
pub fn create_app(state: AppState) -> Router {
    let rate_limiter = state.rate_limiter.clone();
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(http::create_http_routes(state))
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(axum_middleware::from_fn_with_state(
            rate_limiter,
            throttle_by_client,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let port = config.port;

    tracing::info!(
        "Forwarding ratings to {} (musics: {})",
        config.ratings_api_url,
        config.musics_api_url
    );

    let state = AppState::new(config);
    spawn_rate_limiter_cleanup(state.rate_limiter.clone(), RATE_LIMITER_CLEANUP_EVERY);

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("Ratings gateway listening on port {}", port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
