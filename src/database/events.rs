use async_trait::async_trait;

use super::{contains_pattern, Database};
use crate::{
    error::AppResult,
    models::event::{Event, EventFilter, EventListing, NewEvent},
    repository::EventRepository,
};

const EVENT_COLUMNS: &str = "id, host_user_id, space_id, title, description, category, \
                             start_at, end_at, capacity, price_per_spot, status, \
                             created_at, updated_at";

#[async_trait]
impl EventRepository for Database {
    async fn list(&self, filter: &EventFilter) -> AppResult<Vec<EventListing>> {
        let mut q = String::from(
            "SELECT e.id, e.host_user_id, e.space_id, e.title, e.description, e.category,
                    e.start_at, e.end_at, e.capacity, e.price_per_spot, e.status,
                    e.created_at, e.updated_at,
                    s.name AS space_name, s.city, s.country
             FROM events e
             JOIN spaces s ON s.id = e.space_id",
        );

        let mut conditions = Vec::new();
        let mut bind_idx = 1;
        if filter.city.is_some() {
            conditions.push(format!("s.city ILIKE ${} ESCAPE '\\'", bind_idx));
            bind_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("e.category ILIKE ${} ESCAPE '\\'", bind_idx));
            bind_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("e.status = ${}", bind_idx));
        }
        if !conditions.is_empty() {
            q.push_str(" WHERE ");
            q.push_str(&conditions.join(" AND "));
        }
        q.push_str(" ORDER BY e.id DESC");

        let mut dbq = sqlx::query_as::<_, EventListing>(&q);
        if let Some(city) = &filter.city {
            dbq = dbq.bind(contains_pattern(city));
        }
        if let Some(category) = &filter.category {
            dbq = dbq.bind(contains_pattern(category));
        }
        if let Some(status) = &filter.status {
            dbq = dbq.bind(status);
        }

        Ok(dbq.fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, host_user_id: i64, event: NewEvent) -> AppResult<Event> {
        let row = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (
                 host_user_id, space_id, title, description, category,
                 start_at, end_at, capacity, price_per_spot, status
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(host_user_id)
        .bind(event.space_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.category)
        .bind(event.start_at)
        .bind(event.end_at)
        .bind(event.capacity)
        .bind(event.price_per_spot)
        .bind(&event.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, event: &Event) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events
             SET space_id = $1, title = $2, description = $3, category = $4,
                 start_at = $5, end_at = $6, capacity = $7, price_per_spot = $8,
                 status = $9, updated_at = NOW()
             WHERE id = $10
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(event.space_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.category)
        .bind(event.start_at)
        .bind(event.end_at)
        .bind(event.capacity)
        .bind(event.price_per_spot)
        .bind(&event.status)
        .bind(event.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
