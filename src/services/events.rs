use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{
        event::{Event, EventFilter, EventListing, EventPatch, NewEvent},
        space::Space,
    },
    policy::{self, Action, Actor, Resource},
    schema::events::{schedule_is_ordered, END_BEFORE_START},
    AppState,
};

pub struct EventService {
    state: Arc<AppState>,
}

impl EventService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn list(&self, filter: &EventFilter) -> AppResult<Vec<EventListing>> {
        self.state.events.list(filter).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Event> {
        self.state
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event"))
    }

    async fn venue(&self, space_id: i64) -> AppResult<Space> {
        self.state
            .spaces
            .find_by_id(space_id)
            .await?
            .ok_or_else(|| AppError::not_found("Space"))
    }

    pub async fn create(&self, actor: &Actor, event: NewEvent) -> AppResult<Event> {
        let space = self.venue(event.space_id).await?;
        policy::authorize(actor, Action::Create, &Resource::EventVenue(&space)).inspect_err(
            |_| warn!(space_id = space.id, user_id = actor.id, "Event creation denied"),
        )?;

        let event = self.state.events.create(actor.id, event).await?;
        info!(event_id = event.id, space_id = space.id, "Event created");
        Ok(event)
    }

    pub async fn update(&self, actor: &Actor, id: i64, patch: EventPatch) -> AppResult<Event> {
        let mut event = self.get(id).await?;
        policy::authorize(actor, Action::Update, &Resource::Event(&event)).inspect_err(|_| {
            warn!(event_id = id, user_id = actor.id, "Event update denied");
        })?;

        if let Some(space_id) = patch.space_id.filter(|sid| *sid != event.space_id) {
            let space = self.venue(space_id).await?;
            policy::authorize(actor, Action::Update, &Resource::EventVenue(&space))?;
        }

        let touches_schedule = patch.touches_schedule();
        patch.apply(&mut event);
        // Одно из времён могло прийти без другого: сверяем с сохранённым
        if touches_schedule && !schedule_is_ordered(event.start_at, event.end_at) {
            return Err(AppError::invalid_field("end_at", END_BEFORE_START));
        }

        let event = self
            .state
            .events
            .update(&event)
            .await?
            .ok_or_else(|| AppError::not_found("Event"))?;

        info!(event_id = id, "Event updated");
        Ok(event)
    }

    pub async fn delete(&self, actor: &Actor, id: i64) -> AppResult<()> {
        let event = self.get(id).await?;
        policy::authorize(actor, Action::Delete, &Resource::Event(&event)).inspect_err(|_| {
            warn!(event_id = id, user_id = actor.id, "Event delete denied");
        })?;

        if !self.state.events.delete(id).await? {
            return Err(AppError::not_found("Event"));
        }
        info!(event_id = id, "Event deleted");
        Ok(())
    }
}
