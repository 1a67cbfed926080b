use serde::Deserialize;
use validator::Validate;

use super::Violations;
use crate::error::AppResult;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 72))]
    pub password: Option<String>,
    #[serde(rename = "fullName")]
    #[validate(length(min = 1, max = 160))]
    pub full_name: Option<String>,
    #[validate(length(min = 2, max = 10))]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 72))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Email храним и ищем в одном регистре.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl RegisterRequest {
    pub fn into_valid(mut self) -> AppResult<Registration> {
        self.email = self.email.as_deref().map(normalize_email);

        let mut v = Violations::check_with(&self, &[("full_name", "fullName")]);
        let email = v.require("email", self.email);
        let password = v.require("password", self.password);

        match (email, password) {
            (Some(email), Some(password)) if v.is_empty() => Ok(Registration {
                email,
                password,
                full_name: self.full_name,
                locale: self.locale,
            }),
            _ => Err(v.into_error()),
        }
    }
}

impl LoginRequest {
    pub fn into_valid(mut self) -> AppResult<Credentials> {
        self.email = self.email.as_deref().map(normalize_email);

        let mut v = Violations::check(&self);
        let email = v.require("email", self.email);
        let password = v.require("password", self.password);

        match (email, password) {
            (Some(email), Some(password)) if v.is_empty() => Ok(Credentials { email, password }),
            _ => Err(v.into_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn fields(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation { details, .. } => details.into_iter().map(|d| d.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn registration_normalizes_email() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "  Ada@Example.COM ",
            "password": "correct-horse",
            "fullName": "Ada Lovelace"
        }))
        .unwrap();

        let reg = req.into_valid().unwrap();
        assert_eq!(reg.email, "ada@example.com");
        assert_eq!(reg.full_name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn registration_reports_every_problem() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "not-an-email",
            "password": "short"
        }))
        .unwrap();

        assert_eq!(fields(req.into_valid().unwrap_err()), vec!["email", "password"]);
    }

    #[test]
    fn login_requires_both_fields() {
        let req: LoginRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(fields(req.into_valid().unwrap_err()), vec!["email", "password"]);
    }
}
