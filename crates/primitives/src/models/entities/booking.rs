use crate::models::entities::enum_types::{BookingPaymentStatus, BookingStatus};
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Collaborator-owned row; this engine reads the fare and ownership and
/// writes back payment progress.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::bookings)]
pub struct Booking {
    pub id: Uuid,
    pub passenger_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub fare: i64,
    pub status: BookingStatus,
    pub payment_status: BookingPaymentStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
