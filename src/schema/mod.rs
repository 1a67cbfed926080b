//! Проверка формы входных данных.
//!
//! Каждый запрос сначала десериализуется в «сырую» структуру с `Option`-полями,
//! затем `into_valid()` прогоняет правила `validator`, перекрёстные правила и
//! приведение типов, собирая ВСЕ нарушения, а не только первое.

use axum::{
    extract::{FromRequest, FromRequestParts, Path},
    http::request::Parts,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{AppError, FieldViolation};

pub mod auth;
pub mod bookings;
pub mod events;
pub mod spaces;
pub mod users;

pub const REQUIRED: &str = "Required";

/// JSON-тело, отказ которого оформляется как `VALIDATION_ERROR`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

/// Query-строка, отказ которой оформляется как `VALIDATION_ERROR`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ValidQuery<T>(pub T);

/// Идентификатор из пути. Мусор вместо числа даёт 400, а не 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_id(&raw)
            .map(EntityId)
            .ok_or_else(|| AppError::invalid_field("id", "Must be a positive integer"))
    }
}

/// `^[0-9]+$` и строго больше нуля.
pub fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// RFC 3339, плюс минутная точность вида `2030-01-01T10:00Z`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    raw.strip_suffix('Z')
        .or_else(|| raw.strip_suffix('z'))
        .and_then(|naive| NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M").ok())
        .map(|naive| naive.and_utc())
}

/// Накопитель нарушений для одного запроса.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    /// Запускает derive-правила `validator` и забирает их нарушения.
    pub fn check<T: Validate>(input: &T) -> Self {
        Self::check_with(input, &[])
    }

    /// То же, но поля переименовываются в клиентские имена (`total_price` -> `totalPrice`).
    pub fn check_with<T: Validate>(input: &T, wire_names: &[(&str, &str)]) -> Self {
        let mut violations = Self::default();
        if let Err(errors) = input.validate() {
            violations.extend_from(&errors, wire_names);
        }
        violations
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_error(mut self) -> AppError {
        self.0.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::validation(self.0)
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }

    pub fn require<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, REQUIRED);
        }
        value
    }

    /// Число из JSON-числа или числовой строки (`"12"`, `" 3.5 "`).
    /// Всё остальное даёт нарушение на самом поле, а не отказ всего тела.
    pub fn number(&mut self, field: &str, raw: Option<Value>) -> Option<f64> {
        let parsed = match raw? {
            Value::Number(n) => n.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|n| n.is_finite());
        if parsed.is_none() {
            self.push(field, "Expected number");
        }
        parsed
    }

    /// Нижняя граница включительно.
    pub fn at_least(&mut self, field: &str, value: Option<f64>, min: f64) -> Option<f64> {
        let n = value?;
        if n < min {
            self.push(field, format!("Must be greater than or equal to {}", render_bound(min)));
            return None;
        }
        Some(n)
    }

    /// Целое в диапазоне `i32`; дробные значения отклоняются.
    pub fn integer(&mut self, field: &str, value: Option<f64>) -> Option<i32> {
        let n = value?;
        if n.fract() != 0.0 || n < f64::from(i32::MIN) || n > f64::from(i32::MAX) {
            self.push(field, "Expected integer");
            return None;
        }
        Some(n as i32)
    }

    /// Положительный целочисленный идентификатор.
    pub fn id(&mut self, field: &str, value: Option<f64>) -> Option<i64> {
        let n = value?;
        // 2^53: предел точного представления целых в f64
        if n.fract() != 0.0 || n < 1.0 || n > 9_007_199_254_740_991.0 {
            self.push(field, "Must be a positive integer");
            return None;
        }
        Some(n as i64)
    }

    pub fn timestamp(&mut self, field: &str, value: Option<&str>) -> Option<DateTime<Utc>> {
        let raw = value?;
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            self.push(field, "Invalid datetime, expected ISO 8601");
        }
        parsed
    }

    fn extend_from(&mut self, errors: &ValidationErrors, wire_names: &[(&str, &str)]) {
        for (field, field_errors) in errors.field_errors() {
            let name: &str = &field;
            let field = wire_names
                .iter()
                .find(|(rust, _)| *rust == name)
                .map_or(name, |(_, wire)| *wire);
            for err in field_errors.iter() {
                self.push(field, describe(err));
            }
        }
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    let param = |name: &str| err.params.get(name).map(render_param);
    match err.code.as_ref() {
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Must be between {min} and {max} characters"),
            (Some(min), None) => format!("Must be at least {min} characters"),
            (None, Some(max)) => format!("Must be at most {max} characters"),
            _ => "Invalid length".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Must be between {min} and {max}"),
            (Some(min), None) => format!("Must be greater than or equal to {min}"),
            (None, Some(max)) => format!("Must be less than or equal to {max}"),
            _ => "Out of range".to_string(),
        },
        "email" => "Must be a valid email address".to_string(),
        other => format!("Invalid value ({other})"),
    }
}

fn render_param(value: &Value) -> String {
    match value {
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), render_bound),
        other => other.to_string(),
    }
}

fn render_bound(bound: f64) -> String {
    if bound.fract() == 0.0 {
        format!("{}", bound as i64)
    } else {
        bound.to_string()
    }
}
