use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::sync::Arc;
use tracing::warn;

use crate::{
    auth,
    error::AppError,
    models::user::Role,
    policy::{self, Actor},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.user_id,
            role: self.role,
        }
    }
}

/// Пользователь с ролью `host`.
#[derive(Debug, Clone, Copy)]
pub struct RequireHost(pub AuthUser);

/// Пользователь с ролью `admin`.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub AuthUser);

// Bearer JWT extractor
impl FromRequestParts<Arc<crate::AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Получаем заголовок Authorization
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing or invalid Authorization header"))?;

        let token = bearer_token(auth_header)
            .ok_or_else(|| AppError::unauthorized("Missing or invalid Authorization header"))?;

        let claims = auth::verify_token(&state.config.jwt, token)?;

        Ok(AuthUser {
            user_id: claims.id,
            role: claims.role,
        })
    }
}

impl FromRequestParts<Arc<crate::AppState>> for RequireHost {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        gate(&user, Role::Host)?;
        Ok(RequireHost(user))
    }
}

impl FromRequestParts<Arc<crate::AppState>> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        gate(&user, Role::Admin)?;
        Ok(RequireAdmin(user))
    }
}

fn gate(user: &AuthUser, role: Role) -> Result<(), AppError> {
    policy::require_role(&user.actor(), role).inspect_err(|_| {
        warn!(user_id = user.user_id, role = %user.role, required = %role, "Role check failed");
    })
}

/// Схема сравнивается без учёта регистра, как в RFC 6750.
fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
