use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::Violations;
use crate::{
    error::AppResult,
    models::space::{NewSpace, SpaceFilter, SpacePatch},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSpaceRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub country: Option<String>,
    pub capacity: Option<Value>,
}

/// Те же поля, что и при создании, но все необязательные.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSpaceRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub country: Option<String>,
    pub capacity: Option<Value>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SpaceListQuery {
    #[validate(length(min = 1, max = 120))]
    pub city: Option<String>,
}

impl CreateSpaceRequest {
    pub fn into_valid(self) -> AppResult<NewSpace> {
        let mut v = Violations::check(&self);
        let name = v.require("name", self.name);
        let address = v.require("address", self.address);
        let city = v.require("city", self.city);
        let country = v.require("country", self.country);
        let capacity = v.require("capacity", self.capacity);
        let capacity = v.number("capacity", capacity);
        let capacity = v.at_least("capacity", capacity, 0.0);
        let capacity = v.integer("capacity", capacity);

        match (name, address, city, country, capacity) {
            (Some(name), Some(address), Some(city), Some(country), Some(capacity))
                if v.is_empty() =>
            {
                Ok(NewSpace {
                    name,
                    description: self.description.unwrap_or_default(),
                    address,
                    city,
                    country,
                    capacity,
                })
            }
            _ => Err(v.into_error()),
        }
    }
}

impl UpdateSpaceRequest {
    pub fn into_valid(self) -> AppResult<SpacePatch> {
        let mut v = Violations::check(&self);
        let capacity = v.number("capacity", self.capacity);
        let capacity = v.at_least("capacity", capacity, 0.0);
        let capacity = v.integer("capacity", capacity);

        let patch = SpacePatch {
            name: self.name,
            description: self.description,
            address: self.address,
            city: self.city,
            country: self.country,
            capacity,
        };
        if v.is_empty() && patch == SpacePatch::default() {
            v.push("body", "At least one field must be provided");
        }
        v.finish()?;

        Ok(patch)
    }
}

impl SpaceListQuery {
    pub fn into_valid(self) -> AppResult<SpaceFilter> {
        Violations::check(&self).finish()?;
        Ok(SpaceFilter { city: self.city })
    }
}
