use std::sync::Arc;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User},
    policy::{self, Action, Actor, Resource},
    schema::users::ProfilePatch,
    AppState,
};

pub struct UserService {
    state: Arc<AppState>,
}

impl UserService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn me(&self, user_id: i64) -> AppResult<User> {
        self.state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    pub async fn update_me(&self, user_id: i64, patch: ProfilePatch) -> AppResult<User> {
        let current = self.me(user_id).await?;

        let user = self
            .state
            .users
            .update_profile(
                user_id,
                patch.full_name.or(current.full_name),
                patch.locale.or(current.locale),
            )
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        info!(user_id, "Profile updated");
        Ok(user)
    }

    /// Пока на пользователя ссылаются площадки, события или брони, удаление даёт FK_CONFLICT.
    pub async fn delete_me(&self, user_id: i64) -> AppResult<()> {
        if !self.state.users.delete(user_id).await? {
            return Err(AppError::not_found("User"));
        }
        info!(user_id, "Account deleted");
        Ok(())
    }

    pub async fn change_role(&self, actor: &Actor, user_id: i64, role: Role) -> AppResult<User> {
        policy::authorize(actor, Action::Update, &Resource::UserRoles)?;

        let user = self
            .state
            .users
            .update_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        info!(admin_id = actor.id, user_id, role = %role, "Role changed");
        Ok(user)
    }
}
