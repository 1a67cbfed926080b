//! Правила доступа в одном месте.
//!
//! [`authorize`] решает, может ли участник выполнить действие над ресурсом.
//! Функция чистая: всё, что требует похода в базу (например, является ли
//! участник хостом объекта брони), вычисляется заранее и передаётся внутри
//! [`Resource`].

use crate::{
    error::{AppError, AppResult},
    models::{Booking, Event, Role, Space},
};

pub const NO_PERMISSION: &str = "You do not have permission to perform this action";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// Коллекция площадок (создание новой).
    Spaces,
    Space(&'a Space),
    Event(&'a Event),
    /// Площадка, в которой событие создаётся или куда переносится.
    EventVenue(&'a Space),
    /// Брони на объекты хоста (`scope=host`).
    HostBookings,
    UserRoles,
    Booking(BookingAccess<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct BookingAccess<'a> {
    pub booking: &'a Booking,
    /// Участник владеет событием или площадкой, на которые сделана бронь.
    pub actor_hosts_target: bool,
    /// Поля, которые меняет патч (в клиентских именах); пусто для чтения и удаления.
    pub changes: &'a [&'static str],
}

/// Роль совпадает точно: админ не наследует права хоста.
pub fn require_role(actor: &Actor, role: Role) -> AppResult<()> {
    if actor.role == role {
        Ok(())
    } else {
        Err(AppError::forbidden(NO_PERMISSION))
    }
}

pub fn authorize(actor: &Actor, action: Action, resource: &Resource<'_>) -> AppResult<()> {
    match (action, resource) {
        (Action::Create, Resource::Spaces) => require_role(actor, Role::Host),

        (Action::Read, Resource::Space(_) | Resource::Event(_)) => Ok(()),
        (Action::Update | Action::Delete, Resource::Space(space)) => {
            require_role(actor, Role::Host)?;
            owned_by(actor, space.host_user_id, "Not your space")
        }
        (Action::Update | Action::Delete, Resource::Event(event)) => {
            require_role(actor, Role::Host)?;
            owned_by(actor, event.host_user_id, "Not your event")
        }

        (Action::Create, Resource::EventVenue(space)) => {
            require_role(actor, Role::Host)?;
            owned_by(
                actor,
                space.host_user_id,
                "You can only create events in your own spaces",
            )
        }
        (Action::Update, Resource::EventVenue(space)) => {
            require_role(actor, Role::Host)?;
            owned_by(
                actor,
                space.host_user_id,
                "You can only move an event to your own spaces",
            )
        }

        (Action::Read, Resource::HostBookings) => {
            require_role(actor, Role::Host)
                .map_err(|_| AppError::forbidden("Only hosts can view host bookings"))
        }
        (Action::Update, Resource::UserRoles) => require_role(actor, Role::Admin),

        (action, Resource::Booking(access)) => booking_access(actor, action, access),

        _ => Err(AppError::forbidden(NO_PERMISSION)),
    }
}

fn owned_by(actor: &Actor, owner_id: i64, message: &str) -> AppResult<()> {
    if actor.id == owner_id {
        Ok(())
    } else {
        Err(AppError::forbidden(message))
    }
}

fn booking_access(actor: &Actor, action: Action, access: &BookingAccess<'_>) -> AppResult<()> {
    if access.booking.user_id == actor.id {
        return match action {
            Action::Create => Err(AppError::forbidden(NO_PERMISSION)),
            _ => Ok(()),
        };
    }

    let is_target_host = actor.role == Role::Host && access.actor_hosts_target;
    match action {
        Action::Read if is_target_host => Ok(()),
        // Либо весь патч в пределах paymentStatus, либо отказ целиком
        Action::Update if is_target_host => {
            let only_payment = !access.changes.is_empty()
                && access.changes.iter().all(|field| *field == "paymentStatus");
            if only_payment {
                Ok(())
            } else {
                Err(AppError::forbidden("Hosts can only update paymentStatus"))
            }
        }
        _ => Err(AppError::forbidden("You do not have access to this booking")),
    }
}
