use axum::{extract::State, response::Response, routing::post, Router};
use std::sync::Arc;

use super::Data;
use crate::{
    error::AppResult,
    schema::{
        auth::{LoginRequest, RegisterRequest},
        ValidJson,
    },
    services::auth::AuthService,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<RegisterRequest>,
) -> AppResult<Response> {
    let registration = body.into_valid()?;
    let session = AuthService::new(state).register(registration).await?;
    Ok(Data::created(session))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<LoginRequest>,
) -> AppResult<Response> {
    let credentials = body.into_valid()?;
    let session = AuthService::new(state).login(credentials).await?;
    Ok(Data::ok(session))
}
