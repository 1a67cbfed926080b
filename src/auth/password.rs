use tokio::task;

use crate::error::{AppError, AppResult};

// bcrypt нагружает CPU, поэтому уводим его с рантайма
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("bcrypt hash failed: {e}")))
}

/// Битый хеш в базе трактуем как неверный пароль.
pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::Internal(format!("verify task failed: {e}")))
}
