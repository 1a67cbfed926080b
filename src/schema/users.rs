use serde::Deserialize;
use validator::Validate;

use super::Violations;
use crate::{error::AppResult, models::Role};

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(rename = "fullName")]
    #[validate(length(min = 1, max = 160))]
    pub full_name: Option<String>,
    #[validate(length(min = 2, max = 10))]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_valid(self) -> AppResult<ProfilePatch> {
        let mut v = Violations::check_with(&self, &[("full_name", "fullName")]);
        if self.full_name.is_none() && self.locale.is_none() {
            v.push("body", "At least one field must be provided");
        }
        v.finish()?;

        Ok(ProfilePatch {
            full_name: self.full_name,
            locale: self.locale,
        })
    }
}

impl ChangeRoleRequest {
    pub fn into_valid(self) -> AppResult<Role> {
        let mut v = Violations::default();
        let role = v
            .require("role", self.role)
            .and_then(|raw| match Role::try_from(raw) {
                Ok(role) => Some(role),
                Err(_) => {
                    v.push("role", "Must be one of: user, host, admin");
                    None
                }
            });

        match role {
            Some(role) if v.is_empty() => Ok(role),
            _ => Err(v.into_error()),
        }
    }
}
