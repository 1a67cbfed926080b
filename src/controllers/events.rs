use axum::{extract::State, response::Response, routing::get, Router};
use std::sync::Arc;

use super::{no_content, Data};
use crate::{
    error::AppResult,
    middleware::RequireHost,
    schema::{
        events::{CreateEventRequest, EventListQuery, UpdateEventRequest},
        EntityId, ValidJson, ValidQuery,
    },
    services::events::EventService,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).patch(update_event).delete(delete_event),
        )
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<EventListQuery>,
) -> AppResult<Response> {
    let filter = query.into_valid()?;
    let events = EventService::new(state).list(&filter).await?;
    Ok(Data::ok(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> AppResult<Response> {
    let event = EventService::new(state).get(id).await?;
    Ok(Data::ok(event))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    RequireHost(host): RequireHost,
    ValidJson(body): ValidJson<CreateEventRequest>,
) -> AppResult<Response> {
    let event = body.into_valid()?;
    let event = EventService::new(state).create(&host.actor(), event).await?;
    Ok(Data::created(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    RequireHost(host): RequireHost,
    EntityId(id): EntityId,
    ValidJson(body): ValidJson<UpdateEventRequest>,
) -> AppResult<Response> {
    let patch = body.into_valid()?;
    let event = EventService::new(state)
        .update(&host.actor(), id, patch)
        .await?;
    Ok(Data::ok(event))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    RequireHost(host): RequireHost,
    EntityId(id): EntityId,
) -> AppResult<Response> {
    EventService::new(state).delete(&host.actor(), id).await?;
    Ok(no_content())
}
