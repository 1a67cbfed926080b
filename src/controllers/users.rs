use axum::{
    extract::State,
    response::Response,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use super::{no_content, Data};
use crate::{
    error::AppResult,
    middleware::{AuthUser, RequireAdmin},
    schema::{
        users::{ChangeRoleRequest, UpdateProfileRequest},
        EntityId, ValidJson,
    },
    services::users::UserService,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/me", get(get_me).patch(update_me).delete(delete_me))
        .route("/users/{id}/role", patch(change_role))
}

pub async fn get_me(State(state): State<Arc<AppState>>, user: AuthUser) -> AppResult<Response> {
    let me = UserService::new(state).me(user.user_id).await?;
    Ok(Data::ok(me))
}

pub async fn update_me(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidJson(body): ValidJson<UpdateProfileRequest>,
) -> AppResult<Response> {
    let patch = body.into_valid()?;
    let me = UserService::new(state).update_me(user.user_id, patch).await?;
    Ok(Data::ok(me))
}

pub async fn delete_me(State(state): State<Arc<AppState>>, user: AuthUser) -> AppResult<Response> {
    UserService::new(state).delete_me(user.user_id).await?;
    Ok(no_content())
}

pub async fn change_role(
    State(state): State<Arc<AppState>>,
    RequireAdmin(admin): RequireAdmin,
    EntityId(id): EntityId,
    ValidJson(body): ValidJson<ChangeRoleRequest>,
) -> AppResult<Response> {
    let role = body.into_valid()?;
    let user = UserService::new(state)
        .change_role(&admin.actor(), id, role)
        .await?;
    Ok(Data::ok(user))
}
