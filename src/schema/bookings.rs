use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::Violations;
use crate::{
    error::AppResult,
    models::booking::{BookingPatch, BookingScope, BookingTarget, DEFAULT_PAYMENT_STATUS},
};

const WIRE_NAMES: &[(&str, &str)] = &[
    ("total_price", "totalPrice"),
    ("payment_status", "paymentStatus"),
];

pub const TARGET_XOR: &str = "Must provide either eventId OR spaceId (cannot be both)";

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[serde(rename = "eventId")]
    pub event_id: Option<Value>,
    #[serde(rename = "spaceId")]
    pub space_id: Option<Value>,
    pub quantity: Option<Value>,
    #[serde(rename = "totalPrice")]
    pub total_price: Option<Value>,
    #[serde(rename = "paymentStatus")]
    #[validate(length(min = 1, max = 50))]
    pub payment_status: Option<String>,
}

/// Проверенный заказ; владелец брони берётся из токена, а не из тела.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOrder {
    pub target: BookingTarget,
    pub quantity: i32,
    pub total_price: f64,
    pub payment_status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    pub quantity: Option<Value>,
    #[serde(rename = "totalPrice")]
    pub total_price: Option<Value>,
    #[serde(rename = "paymentStatus")]
    #[validate(length(min = 1, max = 50))]
    pub payment_status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    #[serde(default)]
    pub scope: Option<BookingScope>,
}

impl CreateBookingRequest {
    pub fn into_valid(self) -> AppResult<BookingOrder> {
        let mut v = Violations::check_with(&self, WIRE_NAMES);
        let before = v.len();
        let event_id = v.number("eventId", self.event_id);
        let space_id = v.number("spaceId", self.space_id);
        let malformed_target = v.len() > before;

        let target = match (event_id, space_id) {
            // нечисловой идентификатор уже отмечен
            _ if malformed_target => None,
            (Some(event_id), None) => v.id("eventId", Some(event_id)).map(BookingTarget::Event),
            (None, Some(space_id)) => v.id("spaceId", Some(space_id)).map(BookingTarget::Space),
            _ => {
                v.push("eventId", TARGET_XOR);
                None
            }
        };
        let quantity = v.require("quantity", self.quantity);
        let quantity = v.number("quantity", quantity);
        let quantity = v.at_least("quantity", quantity, 1.0);
        let quantity = v.integer("quantity", quantity);
        let total_price = v.require("totalPrice", self.total_price);
        let total_price = v.number("totalPrice", total_price);
        let total_price = v.at_least("totalPrice", total_price, 0.0);

        match (target, quantity, total_price) {
            (Some(target), Some(quantity), Some(total_price)) if v.is_empty() => Ok(BookingOrder {
                target,
                quantity,
                total_price,
                payment_status: self
                    .payment_status
                    .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
            }),
            _ => Err(v.into_error()),
        }
    }
}

impl UpdateBookingRequest {
    pub fn into_valid(self) -> AppResult<BookingPatch> {
        let mut v = Violations::check_with(&self, WIRE_NAMES);
        let quantity = v.number("quantity", self.quantity);
        let quantity = v.at_least("quantity", quantity, 1.0);
        let quantity = v.integer("quantity", quantity);
        let total_price = v.number("totalPrice", self.total_price);
        let total_price = v.at_least("totalPrice", total_price, 0.0);

        let patch = BookingPatch {
            quantity,
            total_price,
            payment_status: self.payment_status,
        };
        if v.is_empty() && patch == BookingPatch::default() {
            v.push("body", "At least one field must be provided");
        }
        v.finish()?;

        Ok(patch)
    }
}

impl BookingListQuery {
    pub fn scope(&self) -> BookingScope {
        self.scope.unwrap_or_default()
    }
}
