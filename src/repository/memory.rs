//! Хранилище в памяти для тестов сервисов и роутера.
//!
//! Повторяет то, что в Postgres дают ограничения схемы: уникальный email,
//! внешние ключи с `ON DELETE RESTRICT`, те же фильтры и порядок выдачи.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{BookingRepository, EventRepository, SpaceRepository, UserRepository};
use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingListing, NewBooking},
        event::{Event, EventFilter, EventListing, NewEvent},
        space::{NewSpace, Space, SpaceFilter},
        user::{NewUser, Role, User},
    },
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    spaces: Vec<Space>,
    events: Vec<Event>,
    bookings: Vec<Booking>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn space(&self, id: i64) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == id)
    }

    fn event(&self, id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    fn listing(&self, booking: &Booking) -> BookingListing {
        let event = booking.event_id.and_then(|id| self.event(id));
        let space = booking.space_id.and_then(|id| self.space(id));
        let booker = self.users.iter().find(|u| u.id == booking.user_id);
        BookingListing {
            booking: booking.clone(),
            event_title: event.map(|e| e.title.clone()),
            event_start: event.map(|e| e.start_at),
            event_end: event.map(|e| e.end_at),
            space_name: space.map(|s| s.name.clone()),
            space_address: space.map(|s| s.address.clone()),
            space_city: space.map(|s| s.city.clone()),
            booker_email: booker.map(|u| u.email.clone()),
            booker_name: booker.and_then(|u| u.full_name.clone()),
        }
    }

    fn host_of(&self, booking: &Booking) -> Option<i64> {
        match (booking.event_id, booking.space_id) {
            (Some(event_id), _) => self.event(event_id).map(|e| e.host_user_id),
            (_, Some(space_id)) => self.space(space_id).map(|s| s.host_user_id),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AppError::Internal("memory store poisoned".into()))
    }
}

fn restrict(what: &str) -> AppError {
    AppError::ForeignKey(format!("{what} is still referenced"))
}

fn missing_reference(what: &str) -> AppError {
    AppError::ForeignKey(format!("referenced {what} does not exist"))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut t = self.lock()?;
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already registered".into()));
        }
        let now = Utc::now();
        let row = User {
            id: t.next_id(),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            full_name: user.full_name,
            locale: user.locale,
            created_at: now,
            updated_at: now,
        };
        t.users.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_profile(
        &self,
        id: i64,
        full_name: Option<String>,
        locale: Option<String>,
    ) -> AppResult<Option<User>> {
        let mut t = self.lock()?;
        Ok(t.users.iter_mut().find(|u| u.id == id).map(|u| {
            u.full_name = full_name;
            u.locale = locale;
            u.updated_at = Utc::now();
            u.clone()
        }))
    }

    async fn update_role(&self, id: i64, role: Role) -> AppResult<Option<User>> {
        let mut t = self.lock()?;
        Ok(t.users.iter_mut().find(|u| u.id == id).map(|u| {
            u.role = role;
            u.updated_at = Utc::now();
            u.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut t = self.lock()?;
        let referenced = t.spaces.iter().any(|s| s.host_user_id == id)
            || t.events.iter().any(|e| e.host_user_id == id)
            || t.bookings.iter().any(|b| b.user_id == id);
        if referenced {
            return Err(restrict("user"));
        }
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        Ok(t.users.len() != before)
    }
}

#[async_trait]
impl SpaceRepository for MemoryStore {
    async fn list(&self, filter: &SpaceFilter) -> AppResult<Vec<Space>> {
        let t = self.lock()?;
        let mut rows: Vec<Space> = t
            .spaces
            .iter()
            .filter(|s| filter.city.as_deref().is_none_or(|c| contains_ci(&s.city, c)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Space>> {
        Ok(self.lock()?.space(id).cloned())
    }

    async fn create(&self, host_user_id: i64, space: NewSpace) -> AppResult<Space> {
        let mut t = self.lock()?;
        if !t.users.iter().any(|u| u.id == host_user_id) {
            return Err(missing_reference("user"));
        }
        let now = Utc::now();
        let row = Space {
            id: t.next_id(),
            host_user_id,
            name: space.name,
            description: space.description,
            address: space.address,
            city: space.city,
            country: space.country,
            capacity: space.capacity,
            created_at: now,
            updated_at: now,
        };
        t.spaces.push(row.clone());
        Ok(row)
    }

    async fn update(&self, space: &Space) -> AppResult<Option<Space>> {
        let mut t = self.lock()?;
        Ok(t.spaces.iter_mut().find(|s| s.id == space.id).map(|s| {
            *s = Space {
                host_user_id: s.host_user_id,
                created_at: s.created_at,
                updated_at: Utc::now(),
                ..space.clone()
            };
            s.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut t = self.lock()?;
        let referenced = t.events.iter().any(|e| e.space_id == id)
            || t.bookings.iter().any(|b| b.space_id == Some(id));
        if referenced {
            return Err(restrict("space"));
        }
        let before = t.spaces.len();
        t.spaces.retain(|s| s.id != id);
        Ok(t.spaces.len() != before)
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn list(&self, filter: &EventFilter) -> AppResult<Vec<EventListing>> {
        let t = self.lock()?;
        let mut rows: Vec<EventListing> = t
            .events
            .iter()
            .filter_map(|e| t.space(e.space_id).map(|s| (e, s)))
            .filter(|(_, s)| filter.city.as_deref().is_none_or(|c| contains_ci(&s.city, c)))
            .filter(|(e, _)| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| contains_ci(&e.category, c))
            })
            .filter(|(e, _)| filter.status.as_deref().is_none_or(|st| e.status == st))
            .map(|(e, s)| EventListing {
                event: e.clone(),
                space_name: s.name.clone(),
                city: s.city.clone(),
                country: s.country.clone(),
            })
            .collect();
        rows.sort_by(|a, b| b.event.id.cmp(&a.event.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Event>> {
        Ok(self.lock()?.event(id).cloned())
    }

    async fn create(&self, host_user_id: i64, event: NewEvent) -> AppResult<Event> {
        let mut t = self.lock()?;
        if t.space(event.space_id).is_none() {
            return Err(missing_reference("space"));
        }
        let now = Utc::now();
        let row = Event {
            id: t.next_id(),
            host_user_id,
            space_id: event.space_id,
            title: event.title,
            description: event.description,
            category: event.category,
            start_at: event.start_at,
            end_at: event.end_at,
            capacity: event.capacity,
            price_per_spot: event.price_per_spot,
            status: event.status,
            created_at: now,
            updated_at: now,
        };
        t.events.push(row.clone());
        Ok(row)
    }

    async fn update(&self, event: &Event) -> AppResult<Option<Event>> {
        let mut t = self.lock()?;
        if t.space(event.space_id).is_none() {
            return Err(missing_reference("space"));
        }
        Ok(t.events.iter_mut().find(|e| e.id == event.id).map(|e| {
            *e = Event {
                host_user_id: e.host_user_id,
                created_at: e.created_at,
                updated_at: Utc::now(),
                ..event.clone()
            };
            e.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut t = self.lock()?;
        if t.bookings.iter().any(|b| b.event_id == Some(id)) {
            return Err(restrict("event"));
        }
        let before = t.events.len();
        t.events.retain(|e| e.id != id);
        Ok(t.events.len() != before)
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let mut t = self.lock()?;
        let target_exists = match (booking.target.event_id(), booking.target.space_id()) {
            (Some(event_id), _) => t.event(event_id).is_some(),
            (_, Some(space_id)) => t.space(space_id).is_some(),
            _ => false,
        };
        if !target_exists {
            return Err(missing_reference("booking target"));
        }
        let now = Utc::now();
        let row = Booking {
            id: t.next_id(),
            event_id: booking.target.event_id(),
            space_id: booking.target.space_id(),
            user_id: booking.user_id,
            quantity: booking.quantity,
            total_price: booking.total_price,
            payment_status: booking.payment_status,
            created_at: now,
            updated_at: now,
        };
        t.bookings.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Booking>> {
        Ok(self.lock()?.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<BookingListing>> {
        let t = self.lock()?;
        let mut rows: Vec<BookingListing> = t
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| t.listing(b))
            .collect();
        // Как ORDER BY e.start_at DESC NULLS LAST, b.id DESC
        rows.sort_by(|a, b| {
            b.event_start
                .cmp(&a.event_start)
                .then_with(|| b.booking.id.cmp(&a.booking.id))
        });
        Ok(rows)
    }

    async fn list_for_host(&self, host_user_id: i64) -> AppResult<Vec<BookingListing>> {
        let t = self.lock()?;
        let mut rows: Vec<BookingListing> = t
            .bookings
            .iter()
            .filter(|b| t.host_of(b) == Some(host_user_id))
            .map(|b| t.listing(b))
            .collect();
        rows.sort_by(|a, b| b.booking.id.cmp(&a.booking.id));
        Ok(rows)
    }

    async fn host_owns(&self, host_user_id: i64, booking_id: i64) -> AppResult<bool> {
        let t = self.lock()?;
        Ok(t.bookings
            .iter()
            .find(|b| b.id == booking_id)
            .is_some_and(|b| t.host_of(b) == Some(host_user_id)))
    }

    async fn update(&self, booking: &Booking) -> AppResult<Option<Booking>> {
        let mut t = self.lock()?;
        Ok(t.bookings.iter_mut().find(|b| b.id == booking.id).map(|b| {
            b.quantity = booking.quantity;
            b.total_price = booking.total_price;
            b.payment_status = booking.payment_status.clone();
            b.updated_at = Utc::now();
            b.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut t = self.lock()?;
        let before = t.bookings.len();
        t.bookings.retain(|b| b.id != id);
        Ok(t.bookings.len() != before)
    }
}
