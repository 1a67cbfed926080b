//! Общие заготовки для тестов: состояние на хранилище в памяти, сиды и
//! помощник для прогона запросов через роутер.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::{
    auth,
    config::{AppConfig, Config, DatabaseConfig, JwtConfig, PasswordConfig},
    models::{
        event::NewEvent,
        space::{NewSpace, Space},
        user::{NewUser, Role, User},
    },
    policy::Actor,
    repository::memory::MemoryStore,
    schema::parse_timestamp,
    AppState,
};

pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            environment: "test".into(),
            rust_log: "space_booking=debug".into(),
            cors_origins: vec![],
        },
        database: DatabaseConfig {
            url: "postgres://unused".into(),
            pool_size: 1,
            acquire_timeout_seconds: 1,
        },
        jwt: JwtConfig {
            secret: "test-secret".into(),
            expires_in_hours: 1,
        },
        password: PasswordConfig { bcrypt_cost: 4 },
    }
}

pub fn memory_state() -> Arc<AppState> {
    AppState::with_store(Arc::new(MemoryStore::new()), test_config())
}

pub fn at(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).expect("valid test timestamp")
}

pub fn actor(user: &User) -> Actor {
    Actor {
        id: user.id,
        role: user.role,
    }
}

/// Пользователь без настоящего пароля: логин через него не пройдёт.
pub async fn seed_user(state: &AppState, email: &str, role: Role) -> User {
    state
        .users
        .create(NewUser {
            email: email.into(),
            password_hash: "!".into(),
            role,
            full_name: Some(format!("Test {}", role)),
            locale: Some("en".into()),
        })
        .await
        .expect("seed user")
}

pub fn new_space(capacity: i32) -> NewSpace {
    NewSpace {
        name: "Loft".into(),
        description: "Sunny room".into(),
        address: "1 Test Rd".into(),
        city: "Lisbon".into(),
        country: "Portugal".into(),
        capacity,
    }
}

pub async fn seed_space(state: &AppState, host_user_id: i64, capacity: i32) -> Space {
    state
        .spaces
        .create(host_user_id, new_space(capacity))
        .await
        .expect("seed space")
}

pub fn new_event(space_id: i64, capacity: i32) -> NewEvent {
    NewEvent {
        space_id,
        title: "Morning flow".into(),
        description: String::new(),
        category: "Movement".into(),
        start_at: at("2030-01-01T09:00:00Z"),
        end_at: at("2030-01-01T10:00:00Z"),
        capacity,
        price_per_spot: 12.5,
        status: "draft".into(),
    }
}

pub fn token_for(state: &AppState, user: &User) -> String {
    auth::issue_token(&state.config.jwt, user.id, user.role).expect("test token")
}

/// Прогоняет один запрос через роутер и разбирает JSON-ответ (`Null` для пустого тела).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}
