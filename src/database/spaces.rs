use async_trait::async_trait;

use super::{contains_pattern, Database};
use crate::{
    error::AppResult,
    models::space::{NewSpace, Space, SpaceFilter},
    repository::SpaceRepository,
};

const SPACE_COLUMNS: &str = "id, host_user_id, name, description, address, city, country, \
                             capacity, created_at, updated_at";

#[async_trait]
impl SpaceRepository for Database {
    async fn list(&self, filter: &SpaceFilter) -> AppResult<Vec<Space>> {
        let mut q = format!("SELECT {SPACE_COLUMNS} FROM spaces");
        if filter.city.is_some() {
            q.push_str(" WHERE city ILIKE $1 ESCAPE '\\'");
        }
        q.push_str(" ORDER BY id DESC");

        let mut dbq = sqlx::query_as::<_, Space>(&q);
        if let Some(city) = &filter.city {
            dbq = dbq.bind(contains_pattern(city));
        }

        Ok(dbq.fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Space>> {
        let row = sqlx::query_as::<_, Space>(&format!(
            "SELECT {SPACE_COLUMNS} FROM spaces WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, host_user_id: i64, space: NewSpace) -> AppResult<Space> {
        let row = sqlx::query_as::<_, Space>(&format!(
            "INSERT INTO spaces (host_user_id, name, description, address, city, country, capacity)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SPACE_COLUMNS}"
        ))
        .bind(host_user_id)
        .bind(&space.name)
        .bind(&space.description)
        .bind(&space.address)
        .bind(&space.city)
        .bind(&space.country)
        .bind(space.capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, space: &Space) -> AppResult<Option<Space>> {
        let row = sqlx::query_as::<_, Space>(&format!(
            "UPDATE spaces
             SET name = $1, description = $2, address = $3, city = $4, country = $5,
                 capacity = $6, updated_at = NOW()
             WHERE id = $7
             RETURNING {SPACE_COLUMNS}"
        ))
        .bind(&space.name)
        .bind(&space.description)
        .bind(&space.address)
        .bind(&space.city)
        .bind(&space.country)
        .bind(space.capacity)
        .bind(space.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM spaces WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
