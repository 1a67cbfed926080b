use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub host_user_id: i64,
    pub space_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub capacity: i32,
    pub price_per_spot: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Событие в списке вместе с данными площадки.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub space_name: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub space_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub capacity: i32,
    pub price_per_spot: f64,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub space_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub price_per_spot: Option<f64>,
    pub status: Option<String>,
}

impl EventPatch {
    pub fn touches_schedule(&self) -> bool {
        self.start_at.is_some() || self.end_at.is_some()
    }

    pub fn apply(self, event: &mut Event) {
        if let Some(space_id) = self.space_id {
            event.space_id = space_id;
        }
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(start_at) = self.start_at {
            event.start_at = start_at;
        }
        if let Some(end_at) = self.end_at {
            event.end_at = end_at;
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        if let Some(price) = self.price_per_spot {
            event.price_per_spot = price;
        }
        if let Some(status) = self.status {
            event.status = status;
        }
    }
}

/// Фильтры списка событий; все условия объединяются через AND.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub city: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}
