use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    auth,
    error::{AppError, AppResult},
    models::user::{NewUser, Role, User},
    schema::auth::{Credentials, Registration},
    AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Пользователь вместе со свежим токеном.
#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

pub struct AuthService {
    state: Arc<AppState>,
}

impl AuthService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn register(&self, registration: Registration) -> AppResult<AuthSession> {
        if self
            .state
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let password_hash = auth::hash_password(
            registration.password,
            self.state.config.password.bcrypt_cost,
        )
        .await?;

        // Уникальный индекс всё равно отсечёт гонку двух регистраций
        let user = self
            .state
            .users
            .create(NewUser {
                email: registration.email,
                password_hash,
                role: Role::User,
                full_name: registration.full_name,
                locale: registration.locale,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        self.session(user)
    }

    pub async fn login(&self, credentials: Credentials) -> AppResult<AuthSession> {
        let Some(user) = self.state.users.find_by_email(&credentials.email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let valid =
            auth::verify_password(credentials.password, user.password_hash.clone()).await?;
        if !valid {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = user.id, "User logged in");
        self.session(user)
    }

    fn session(&self, user: User) -> AppResult<AuthSession> {
        let token = auth::issue_token(&self.state.config.jwt, user.id, user.role)?;
        Ok(AuthSession { user, token })
    }
}
