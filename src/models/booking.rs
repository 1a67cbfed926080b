use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub event_id: Option<i64>,
    pub space_id: Option<i64>,
    pub user_id: i64,
    pub quantity: i32,
    pub total_price: f64,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Объект бронирования: ровно одно из события или площадки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTarget {
    Event(i64),
    Space(i64),
}

impl BookingTarget {
    pub fn event_id(&self) -> Option<i64> {
        match self {
            BookingTarget::Event(id) => Some(*id),
            BookingTarget::Space(_) => None,
        }
    }

    pub fn space_id(&self) -> Option<i64> {
        match self {
            BookingTarget::Space(id) => Some(*id),
            BookingTarget::Event(_) => None,
        }
    }
}

impl Booking {
    /// `None` только для строки, нарушившей XOR (CHECK в БД этого не допускает).
    pub fn target(&self) -> Option<BookingTarget> {
        match (self.event_id, self.space_id) {
            (Some(event_id), None) => Some(BookingTarget::Event(event_id)),
            (None, Some(space_id)) => Some(BookingTarget::Space(space_id)),
            _ => None,
        }
    }
}

/// Бронь в списке: с контекстом события/площадки и данными гостя.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub event_title: Option<String>,
    pub event_start: Option<DateTime<Utc>>,
    pub event_end: Option<DateTime<Utc>>,
    pub space_name: Option<String>,
    pub space_address: Option<String>,
    pub space_city: Option<String>,
    pub booker_email: Option<String>,
    pub booker_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub target: BookingTarget,
    pub user_id: i64,
    pub quantity: i32,
    pub total_price: f64,
    pub payment_status: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub quantity: Option<i32>,
    pub total_price: Option<f64>,
    pub payment_status: Option<String>,
}

impl BookingPatch {
    /// Имена переданных полей в том виде, как их видит клиент.
    pub fn supplied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.quantity.is_some() {
            fields.push("quantity");
        }
        if self.total_price.is_some() {
            fields.push("totalPrice");
        }
        if self.payment_status.is_some() {
            fields.push("paymentStatus");
        }
        fields
    }

    pub fn apply(self, booking: &mut Booking) {
        if let Some(quantity) = self.quantity {
            booking.quantity = quantity;
        }
        if let Some(total_price) = self.total_price {
            booking.total_price = total_price;
        }
        if let Some(payment_status) = self.payment_status {
            booking.payment_status = payment_status;
        }
    }
}

/// Область выборки списка броней.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingScope {
    #[default]
    Mine,
    Host,
}
