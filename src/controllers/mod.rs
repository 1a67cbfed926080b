pub mod auth;
pub mod bookings;
pub mod events;
pub mod spaces;
pub mod users;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::{error::AppError, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(|| async { "Space Booking API v1.0" }))
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(users::routes())
        .merge(spaces::routes())
        .merge(events::routes())
        .merge(bookings::routes())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

/// Успешный ответ в конверте `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    data: T,
}

impl<T: Serialize> Data<T> {
    pub fn ok(data: T) -> Response {
        Json(Data { data }).into_response()
    }

    pub fn created(data: T) -> Response {
        (StatusCode::CREATED, Json(Data { data })).into_response()
    }
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
