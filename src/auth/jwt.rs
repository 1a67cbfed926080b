use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::JwtConfig,
    error::{AppError, AppResult},
    models::user::Role,
};

/// Полезная нагрузка токена: кто и с какой ролью.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(config: &JwtConfig, user_id: i64, role: Role) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = Duration::try_hours(config.expires_in_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::Internal(format!("token ttl out of range: {}h", config.expires_in_hours))
        })?;
    let claims = Claims {
        id: user_id,
        role,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
}

/// Подпись, срок действия и формат проверяются здесь; любая ошибка = 401.
pub fn verify_token(config: &JwtConfig, token: &str) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "Rejected bearer token");
        AppError::unauthorized("Invalid or expired token")
    })
}
