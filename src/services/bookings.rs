//! Бронирования: проверка вместимости и доступ владельца / хоста объекта.
//!
//! Проверка вместимости сравнивает только запрошенное количество с
//! объявленной вместимостью события или площадки. Уже сделанные брони не
//! вычитаются, а проверка и вставка не атомарны: две параллельные брони
//! на последнее место обе проходят.

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingListing, BookingPatch, BookingScope, BookingTarget, NewBooking},
        Role,
    },
    policy::{self, Action, Actor, BookingAccess, Resource},
    schema::bookings::BookingOrder,
    AppState,
};

pub struct BookingService {
    state: Arc<AppState>,
}

impl BookingService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn create(&self, actor: &Actor, order: BookingOrder) -> AppResult<Booking> {
        self.ensure_capacity(order.target, order.quantity).await?;

        let booking = self
            .state
            .bookings
            .create(NewBooking {
                target: order.target,
                user_id: actor.id,
                quantity: order.quantity,
                total_price: order.total_price,
                payment_status: order.payment_status,
            })
            .await?;

        info!(
            booking_id = booking.id,
            user_id = actor.id,
            target = ?order.target,
            quantity = booking.quantity,
            "Booking created"
        );
        Ok(booking)
    }

    pub async fn list(&self, actor: &Actor, scope: BookingScope) -> AppResult<Vec<BookingListing>> {
        match scope {
            BookingScope::Mine => self.state.bookings.list_for_user(actor.id).await,
            BookingScope::Host => {
                policy::authorize(actor, Action::Read, &Resource::HostBookings)?;
                self.state.bookings.list_for_host(actor.id).await
            }
        }
    }

    pub async fn get(&self, actor: &Actor, id: i64) -> AppResult<Booking> {
        let booking = self.load(id).await?;
        self.authorize(actor, Action::Read, &booking, &[]).await?;
        Ok(booking)
    }

    /// Хост объекта может менять только `paymentStatus`; смешанный патч отклоняется целиком.
    pub async fn update(&self, actor: &Actor, id: i64, patch: BookingPatch) -> AppResult<Booking> {
        let mut booking = self.load(id).await?;
        let changes = patch.supplied_fields();
        self.authorize(actor, Action::Update, &booking, &changes).await?;

        if let Some(quantity) = patch.quantity {
            let target = booking
                .target()
                .ok_or_else(|| AppError::Internal(format!("booking {id} has no target")))?;
            self.ensure_capacity(target, quantity).await?;
        }

        patch.apply(&mut booking);
        let booking = self
            .state
            .bookings
            .update(&booking)
            .await?
            .ok_or_else(|| AppError::not_found("Booking"))?;

        info!(booking_id = id, user_id = actor.id, fields = ?changes, "Booking updated");
        Ok(booking)
    }

    pub async fn delete(&self, actor: &Actor, id: i64) -> AppResult<()> {
        let booking = self.load(id).await?;
        self.authorize(actor, Action::Delete, &booking, &[]).await?;

        if !self.state.bookings.delete(id).await? {
            return Err(AppError::not_found("Booking"));
        }
        info!(booking_id = id, user_id = actor.id, "Booking deleted");
        Ok(())
    }

    async fn load(&self, id: i64) -> AppResult<Booking> {
        self.state
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking"))
    }

    async fn authorize(
        &self,
        actor: &Actor,
        action: Action,
        booking: &Booking,
        changes: &[&'static str],
    ) -> AppResult<()> {
        // В базу идём только когда это может что-то изменить
        let actor_hosts_target = booking.user_id != actor.id
            && actor.role == Role::Host
            && self.state.bookings.host_owns(actor.id, booking.id).await?;

        let access = BookingAccess {
            booking,
            actor_hosts_target,
            changes,
        };
        policy::authorize(actor, action, &Resource::Booking(access)).inspect_err(|_| {
            warn!(
                booking_id = booking.id,
                user_id = actor.id,
                action = ?action,
                "Booking access denied"
            );
        })
    }

    async fn ensure_capacity(&self, target: BookingTarget, quantity: i32) -> AppResult<()> {
        let capacity = match target {
            BookingTarget::Event(event_id) => {
                self.state
                    .events
                    .find_by_id(event_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Event"))?
                    .capacity
            }
            BookingTarget::Space(space_id) => {
                self.state
                    .spaces
                    .find_by_id(space_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Space"))?
                    .capacity
            }
        };

        if quantity > capacity {
            return Err(AppError::invalid_field(
                "quantity",
                format!("Quantity exceeds capacity ({capacity})"),
            ));
        }
        Ok(())
    }
}
