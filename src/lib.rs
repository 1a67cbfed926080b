pub mod auth;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod repository;
pub mod schema;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::repository::{BookingRepository, EventRepository, SpaceRepository, UserRepository};

// Shared state для всего приложения
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub spaces: Arc<dyn SpaceRepository>,
    pub events: Arc<dyn EventRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(db: database::Database, config: config::Config) -> Arc<Self> {
        Self::with_store(Arc::new(db), config)
    }

    /// Одно хранилище обслуживает все четыре репозитория.
    pub fn with_store<S>(store: Arc<S>, config: config::Config) -> Arc<Self>
    where
        S: UserRepository + SpaceRepository + EventRepository + BookingRepository + 'static,
    {
        Arc::new(Self {
            users: store.clone(),
            spaces: store.clone(),
            events: store.clone(),
            bookings: store,
            config,
        })
    }
}

/// Полный роутер приложения со слоями трассировки и CORS.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.app.cors_origins);

    Router::new()
        .merge(controllers::routes())
        .fallback(controllers::not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
