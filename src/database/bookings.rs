use async_trait::async_trait;

use super::Database;
use crate::{
    error::AppResult,
    models::booking::{Booking, BookingListing, NewBooking},
    repository::BookingRepository,
};

const BOOKING_COLUMNS: &str = "id, event_id, space_id, user_id, quantity, total_price, \
                               payment_status, created_at, updated_at";

// Общая часть выборки списков: бронь + событие + площадка + гость
const LISTING_SELECT: &str = r#"
    SELECT b.id, b.event_id, b.space_id, b.user_id, b.quantity, b.total_price,
           b.payment_status, b.created_at, b.updated_at,
           e.title AS event_title, e.start_at AS event_start, e.end_at AS event_end,
           s.name AS space_name, s.address AS space_address, s.city AS space_city,
           u.email AS booker_email, u.full_name AS booker_name
    FROM bookings b
    LEFT JOIN events e ON e.id = b.event_id
    LEFT JOIN spaces s ON s.id = b.space_id
    JOIN users u ON u.id = b.user_id
"#;

#[async_trait]
impl BookingRepository for Database {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO bookings (event_id, space_id, user_id, quantity, total_price, payment_status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking.target.event_id())
        .bind(booking.target.space_id())
        .bind(booking.user_id)
        .bind(booking.quantity)
        .bind(booking.total_price)
        .bind(&booking.payment_status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<BookingListing>> {
        let rows = sqlx::query_as::<_, BookingListing>(&format!(
            "{LISTING_SELECT}
             WHERE b.user_id = $1
             ORDER BY e.start_at DESC NULLS LAST, b.id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_for_host(&self, host_user_id: i64) -> AppResult<Vec<BookingListing>> {
        let rows = sqlx::query_as::<_, BookingListing>(&format!(
            "{LISTING_SELECT}
             WHERE e.host_user_id = $1 OR s.host_user_id = $1
             ORDER BY b.id DESC"
        ))
        .bind(host_user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn host_owns(&self, host_user_id: i64, booking_id: i64) -> AppResult<bool> {
        let owns = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
              SELECT 1
              FROM bookings b
              LEFT JOIN events e ON e.id = b.event_id
              LEFT JOIN spaces s ON s.id = b.space_id
              WHERE b.id = $1 AND (e.host_user_id = $2 OR s.host_user_id = $2)
            )
            "#,
        )
        .bind(booking_id)
        .bind(host_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(owns)
    }

    async fn update(&self, booking: &Booking) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings
             SET quantity = $1, total_price = $2, payment_status = $3, updated_at = NOW()
             WHERE id = $4
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking.quantity)
        .bind(booking.total_price)
        .bind(&booking.payment_status)
        .bind(booking.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
