use axum::{extract::State, response::Response, routing::get, Router};
use std::sync::Arc;

use super::{no_content, Data};
use crate::{
    error::AppResult,
    middleware::RequireHost,
    schema::{
        spaces::{CreateSpaceRequest, SpaceListQuery, UpdateSpaceRequest},
        EntityId, ValidJson, ValidQuery,
    },
    services::spaces::SpaceService,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/spaces", get(list_spaces).post(create_space))
        .route(
            "/spaces/{id}",
            get(get_space).patch(update_space).delete(delete_space),
        )
}

pub async fn list_spaces(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<SpaceListQuery>,
) -> AppResult<Response> {
    let filter = query.into_valid()?;
    let spaces = SpaceService::new(state).list(&filter).await?;
    Ok(Data::ok(spaces))
}

pub async fn get_space(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
) -> AppResult<Response> {
    let space = SpaceService::new(state).get(id).await?;
    Ok(Data::ok(space))
}

pub async fn create_space(
    State(state): State<Arc<AppState>>,
    RequireHost(host): RequireHost,
    ValidJson(body): ValidJson<CreateSpaceRequest>,
) -> AppResult<Response> {
    let space = body.into_valid()?;
    let space = SpaceService::new(state).create(&host.actor(), space).await?;
    Ok(Data::created(space))
}

pub async fn update_space(
    State(state): State<Arc<AppState>>,
    RequireHost(host): RequireHost,
    EntityId(id): EntityId,
    ValidJson(body): ValidJson<UpdateSpaceRequest>,
) -> AppResult<Response> {
    let patch = body.into_valid()?;
    let space = SpaceService::new(state)
        .update(&host.actor(), id, patch)
        .await?;
    Ok(Data::ok(space))
}

pub async fn delete_space(
    State(state): State<Arc<AppState>>,
    RequireHost(host): RequireHost,
    EntityId(id): EntityId,
) -> AppResult<Response> {
    SpaceService::new(state).delete(&host.actor(), id).await?;
    Ok(no_content())
}

#[cfg(test)]
mod tests {
    use crate::models::user::Role;
    use crate::test_support::{memory_state, seed_user, send, token_for};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    fn space_body() -> serde_json::Value {
        json!({
            "name": "Loft",
            "description": "Sunny room",
            "address": "1 Test Rd",
            "city": "Lisbon",
            "country": "Portugal",
            "capacity": 12
        })
    }

    #[tokio::test]
    async fn create_fetch_round_trip() {
        let state = memory_state();
        let host = seed_user(&state, "host@example.com", Role::Host).await;
        let token = token_for(&state, &host);
        let app = crate::app(state);

        let (status, created) = send(
            &app,
            Method::POST,
            "/spaces",
            Some(&token),
            Some(space_body()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, fetched) = send(&app, Method::GET, &format!("/spaces/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        for field in ["name", "description", "address", "city", "country", "capacity"] {
            assert_eq!(fetched["data"][field], space_body()[field], "field {field}");
        }
        assert_eq!(fetched["data"]["host_user_id"], host.id);

        let (status, listed) = send(&app, Method::GET, "/spaces?city=lis", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn guests_cannot_create() {
        let state = memory_state();
        let guest = seed_user(&state, "guest@example.com", Role::User).await;
        let token = token_for(&state, &guest);
        let app = crate::app(state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/spaces",
            Some(&token),
            Some(space_body()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");

        let (status, _) = send(&app, Method::POST, "/spaces", None, Some(space_body())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn foreign_host_patch_and_delete_are_forbidden() {
        let state = memory_state();
        let owner = seed_user(&state, "owner@example.com", Role::Host).await;
        let other = seed_user(&state, "other@example.com", Role::Host).await;
        let owner_token = token_for(&state, &owner);
        let other_token = token_for(&state, &other);
        let app = crate::app(state);

        let (_, created) = send(
            &app,
            Method::POST,
            "/spaces",
            Some(&owner_token),
            Some(space_body()),
        )
        .await;
        let uri = format!("/spaces/{}", created["data"]["id"]);

        let (status, _) = send(
            &app,
            Method::PATCH,
            &uri,
            Some(&other_token),
            Some(json!({"name": "Taken"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send(&app, Method::DELETE, &uri, Some(&other_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, fetched) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(fetched["data"]["name"], "Loft");

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&owner_token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &uri, Some(&owner_token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ids_are_validated_before_lookup() {
        let app = crate::app(memory_state());

        let (status, body) = send(&app, Method::GET, "/spaces/999999", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Space not found");

        for bad in ["/spaces/abc", "/spaces/0", "/spaces/-1"] {
            let (status, body) = send(&app, Method::GET, bad, None, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn invalid_body_lists_all_fields() {
        let state = memory_state();
        let host = seed_user(&state, "host@example.com", Role::Host).await;
        let token = token_for(&state, &host);
        let app = crate::app(state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/spaces",
            Some(&token),
            Some(json!({"capacity": "lots"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"].as_array().unwrap().len(), 5);

        let (status, body) = send(
            &app,
            Method::POST,
            "/spaces",
            Some(&token),
            Some(json!({"name": "Loft"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"].as_array().unwrap().len(), 4);
    }
}
