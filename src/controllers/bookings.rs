use axum::{extract::State, response::Response, routing::get, Router};
use std::sync::Arc;

use super::{no_content, Data};
use crate::{
    error::AppResult,
    middleware::AuthUser,
    schema::{
        bookings::{BookingListQuery, CreateBookingRequest, UpdateBookingRequest},
        EntityId, ValidJson, ValidQuery,
    },
    services::bookings::BookingService,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{id}",
            get(get_booking).patch(update_booking).delete(delete_booking),
        )
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidJson(body): ValidJson<CreateBookingRequest>,
) -> AppResult<Response> {
    let order = body.into_valid()?;
    let booking = BookingService::new(state).create(&user.actor(), order).await?;
    Ok(Data::created(booking))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidQuery(query): ValidQuery<BookingListQuery>,
) -> AppResult<Response> {
    let bookings = BookingService::new(state)
        .list(&user.actor(), query.scope())
        .await?;
    Ok(Data::ok(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    EntityId(id): EntityId,
) -> AppResult<Response> {
    let booking = BookingService::new(state).get(&user.actor(), id).await?;
    Ok(Data::ok(booking))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    EntityId(id): EntityId,
    ValidJson(body): ValidJson<UpdateBookingRequest>,
) -> AppResult<Response> {
    let patch = body.into_valid()?;
    let booking = BookingService::new(state)
        .update(&user.actor(), id, patch)
        .await?;
    Ok(Data::ok(booking))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    EntityId(id): EntityId,
) -> AppResult<Response> {
    BookingService::new(state).delete(&user.actor(), id).await?;
    Ok(no_content())
}
