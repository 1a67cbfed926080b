use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Space {
    pub id: i64,
    pub host_user_id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSpace {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub capacity: i32,
}

/// Частичное обновление площадки; `None` = поле не трогаем.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpacePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub capacity: Option<i32>,
}

impl SpacePatch {
    /// Накладывает переданные поля поверх текущей строки.
    pub fn apply(self, space: &mut Space) {
        if let Some(name) = self.name {
            space.name = name;
        }
        if let Some(description) = self.description {
            space.description = description;
        }
        if let Some(address) = self.address {
            space.address = address;
        }
        if let Some(city) = self.city {
            space.city = city;
        }
        if let Some(country) = self.country {
            space.country = country;
        }
        if let Some(capacity) = self.capacity {
            space.capacity = capacity;
        }
    }
}

/// Фильтр списка площадок.
#[derive(Debug, Clone, Default)]
pub struct SpaceFilter {
    pub city: Option<String>,
}
