use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::Violations;
use crate::{
    error::AppResult,
    models::event::{EventFilter, EventPatch, NewEvent},
};

pub const DEFAULT_EVENT_STATUS: &str = "draft";
pub const END_BEFORE_START: &str = "end_at must be after start_at";

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    pub space_id: Option<Value>,
    #[validate(length(min = 1, max = 160))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub category: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub capacity: Option<Value>,
    pub price_per_spot: Option<Value>,
    #[validate(length(min = 1, max = 60))]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    pub space_id: Option<Value>,
    #[validate(length(min = 1, max = 160))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub category: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub capacity: Option<Value>,
    pub price_per_spot: Option<Value>,
    #[validate(length(min = 1, max = 60))]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EventListQuery {
    #[validate(length(min = 1, max = 120))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 60))]
    pub status: Option<String>,
}

/// Конец строго позже начала.
pub fn schedule_is_ordered(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> bool {
    end_at > start_at
}

impl CreateEventRequest {
    pub fn into_valid(self) -> AppResult<NewEvent> {
        let mut v = Violations::check(&self);
        let space_id = v.require("space_id", self.space_id);
        let space_id = v.number("space_id", space_id);
        let space_id = v.id("space_id", space_id);
        let title = v.require("title", self.title);
        let category = v.require("category", self.category);
        let start_at = v.require("start_at", self.start_at.as_deref());
        let start_at = v.timestamp("start_at", start_at);
        let end_at = v.require("end_at", self.end_at.as_deref());
        let end_at = v.timestamp("end_at", end_at);
        let capacity = v.require("capacity", self.capacity);
        let capacity = v.number("capacity", capacity);
        let capacity = v.at_least("capacity", capacity, 0.0);
        let capacity = v.integer("capacity", capacity);
        let price_per_spot = v.require("price_per_spot", self.price_per_spot);
        let price_per_spot = v.number("price_per_spot", price_per_spot);
        let price_per_spot = v.at_least("price_per_spot", price_per_spot, 0.0);

        if let (Some(start), Some(end)) = (start_at, end_at) {
            if !schedule_is_ordered(start, end) {
                v.push("end_at", END_BEFORE_START);
            }
        }

        match (space_id, title, category, start_at, end_at, capacity, price_per_spot) {
            (
                Some(space_id),
                Some(title),
                Some(category),
                Some(start_at),
                Some(end_at),
                Some(capacity),
                Some(price_per_spot),
            ) if v.is_empty() => Ok(NewEvent {
                space_id,
                title,
                description: self.description.unwrap_or_default(),
                category,
                start_at,
                end_at,
                capacity,
                price_per_spot,
                status: self
                    .status
                    .unwrap_or_else(|| DEFAULT_EVENT_STATUS.to_string()),
            }),
            _ => Err(v.into_error()),
        }
    }
}

impl UpdateEventRequest {
    /// Если в патче есть оба времени, порядок проверяется здесь;
    /// если одно, сервис сверяет его с сохранённым значением.
    pub fn into_valid(self) -> AppResult<EventPatch> {
        let mut v = Violations::check(&self);
        let space_id = v.number("space_id", self.space_id);
        let space_id = v.id("space_id", space_id);
        let start_at = v.timestamp("start_at", self.start_at.as_deref());
        let end_at = v.timestamp("end_at", self.end_at.as_deref());
        let capacity = v.number("capacity", self.capacity);
        let capacity = v.at_least("capacity", capacity, 0.0);
        let capacity = v.integer("capacity", capacity);
        let price_per_spot = v.number("price_per_spot", self.price_per_spot);
        let price_per_spot = v.at_least("price_per_spot", price_per_spot, 0.0);

        if let (Some(start), Some(end)) = (start_at, end_at) {
            if !schedule_is_ordered(start, end) {
                v.push("end_at", END_BEFORE_START);
            }
        }

        let patch = EventPatch {
            space_id,
            title: self.title,
            description: self.description,
            category: self.category,
            start_at,
            end_at,
            capacity,
            price_per_spot,
            status: self.status,
        };
        if v.is_empty() && patch == EventPatch::default() {
            v.push("body", "At least one field must be provided");
        }
        v.finish()?;

        Ok(patch)
    }
}

impl EventListQuery {
    pub fn into_valid(self) -> AppResult<EventFilter> {
        Violations::check(&self).finish()?;
        Ok(EventFilter {
            city: self.city,
            category: self.category,
            status: self.status,
        })
    }
}
