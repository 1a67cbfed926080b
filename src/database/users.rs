use async_trait::async_trait;

use super::Database;
use crate::{
    error::AppResult,
    models::user::{NewUser, Role, User},
    repository::UserRepository,
};

const USER_COLUMNS: &str =
    "id, email, password_hash, role, full_name, locale, created_at, updated_at";

#[async_trait]
impl UserRepository for Database {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, role, full_name, locale)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.full_name)
        .bind(&user.locale)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_profile(
        &self,
        id: i64,
        full_name: Option<String>,
        locale: Option<String>,
    ) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET full_name = $1, locale = $2, updated_at = NOW()
             WHERE id = $3
             RETURNING {USER_COLUMNS}"
        ))
        .bind(full_name)
        .bind(locale)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_role(&self, id: i64, role: Role) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET role = $1, updated_at = NOW()
             WHERE id = $2
             RETURNING {USER_COLUMNS}"
        ))
        .bind(role.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
