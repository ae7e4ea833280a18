//! Diet Tracker Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod relay;
pub mod routes;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};
pub use relay::RelayClient;
pub use store::{open_store, Store};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use routes::{
    current_session, daily_summary, health_check, list_meals, log_meal, login, logout,
    weekly_trends,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Config,
    pub relay: RelayClient,
}

impl AppState {
    /// Create a new AppState with the given store, configuration and relay client
    pub fn new(store: Store, config: Config, relay: RelayClient) -> Self {
        Self {
            store,
            config,
            relay,
        }
    }
}

/// Build the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .allowed_origins
                .iter()
                .filter_map(|s| {
                    s.parse::<axum::http::HeaderValue>()
                        .map_err(|_| tracing::warn!("Ignoring invalid CORS origin: {}", s))
                        .ok()
                })
                .collect::<Vec<_>>(),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/session",
            get(current_session)
                .post(login)
                .delete(logout),
        )
        .route("/api/meals", post(log_meal).get(list_meals))
        .route("/api/summary", get(daily_summary))
        .route("/api/trends", get(weekly_trends))
        .layer(cors)
        .with_state(state)
}
