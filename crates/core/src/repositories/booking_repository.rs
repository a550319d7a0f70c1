use chrono::Utc;
use diesel::prelude::*;
use sawari_primitives::error::ApiError;
use sawari_primitives::models::entities::booking::Booking;
use sawari_primitives::models::entities::enum_types::{BookingPaymentStatus, BookingStatus};
use sawari_primitives::schema::bookings;
use uuid::Uuid;

pub struct BookingRepository;

impl BookingRepository {
    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Booking>, ApiError> {
        bookings::table
            .find(id)
            .first::<Booking>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn set_payment_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: BookingPaymentStatus,
    ) -> Result<(), ApiError> {
        diesel::update(bookings::table.find(id))
            .set((
                bookings::payment_status.eq(status),
                bookings::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }

    /// Ride is done and paid for; the fare was captured.
    pub fn mark_completed(conn: &mut PgConnection, id: Uuid) -> Result<(), ApiError> {
        diesel::update(bookings::table.find(id))
            .set((
                bookings::status.eq(BookingStatus::Completed),
                bookings::payment_status.eq(BookingPaymentStatus::Paid),
                bookings::completed_at.eq(Utc::now()),
                bookings::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }

    pub fn mark_payment_failed(conn: &mut PgConnection, id: Uuid) -> Result<(), ApiError> {
        Self::set_payment_status(conn, id, BookingPaymentStatus::Failed)
    }
}
