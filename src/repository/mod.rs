//! Контракты слоя доступа к данным.
//!
//! Сервисы работают только через эти трейты; Postgres-реализация живёт в
//! [`crate::database`], а тесты подставляют хранилище в памяти.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{
        booking::{Booking, BookingListing, NewBooking},
        event::{Event, EventFilter, EventListing, NewEvent},
        space::{NewSpace, Space, SpaceFilter},
        user::{NewUser, Role, User},
    },
};

#[cfg(test)]
pub mod memory;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> AppResult<User>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    // Записывает уже слитые поля профиля
    async fn update_profile(
        &self,
        id: i64,
        full_name: Option<String>,
        locale: Option<String>,
    ) -> AppResult<Option<User>>;
    async fn update_role(&self, id: i64, role: Role) -> AppResult<Option<User>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn list(&self, filter: &SpaceFilter) -> AppResult<Vec<Space>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Space>>;
    async fn create(&self, host_user_id: i64, space: NewSpace) -> AppResult<Space>;
    /// Перезаписывает изменяемые поля; `None`, если строки уже нет.
    async fn update(&self, space: &Space) -> AppResult<Option<Space>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list(&self, filter: &EventFilter) -> AppResult<Vec<EventListing>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Event>>;
    async fn create(&self, host_user_id: i64, event: NewEvent) -> AppResult<Event>;
    async fn update(&self, event: &Event) -> AppResult<Option<Event>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Booking>>;
    /// Брони пользователя: по началу события (новые сверху), брони площадок в конце.
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<BookingListing>>;
    /// Брони на события и площадки, которыми владеет хост.
    async fn list_for_host(&self, host_user_id: i64) -> AppResult<Vec<BookingListing>>;
    async fn host_owns(&self, host_user_id: i64, booking_id: i64) -> AppResult<bool>;
    async fn update(&self, booking: &Booking) -> AppResult<Option<Booking>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}
