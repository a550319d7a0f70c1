use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Charge-side lifecycle of a transaction.
///
/// `created → pending → captured` is the success path; `created/pending →
/// failed` is terminal for this engine (a new attempt means a new
/// transaction). `refunded` only ever arrives from upstream support tooling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::PaymentStatus"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    Created,
    Pending,
    Captured,
    Failed,
    Refunded,
}

impl PaymentStatus {
    /// States that count against the one-active-charge-per-booking rule.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Created | Self::Pending | Self::Captured)
    }

    pub fn can_capture(self) -> bool {
        matches!(self, Self::Created | Self::Pending)
    }

    pub fn can_fail(self) -> bool {
        matches!(self, Self::Created | Self::Pending)
    }
}

/// Payout-side rollup stored on the transaction, read by dashboards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::SettlementStatus"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SettlementStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Gateway-mirrored lifecycle of a single payout attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::PayoutStatus"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PayoutStatus {
    Queued,
    Pending,
    Processing,
    Processed,
    Cancelled,
    Reversed,
    Failed,
}

impl PayoutStatus {
    /// States that occupy the one-live-payout-per-transaction slot.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Queued | Self::Pending | Self::Processing)
    }

    /// No further automatic transition is allowed out of these.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Processed | Self::Cancelled | Self::Reversed)
    }

    pub fn can_fail(self) -> bool {
        self.is_live()
    }

    pub fn can_reverse(self) -> bool {
        matches!(self, Self::Processing | Self::Processed)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::PayoutMode"]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum PayoutMode {
    #[db_rename = "IMPS"]
    Imps,
    #[db_rename = "NEFT"]
    Neft,
    #[db_rename = "UPI"]
    Upi,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::BookingStatus"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::BookingPaymentStatus"]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingPaymentStatus {
    Unpaid,
    Pending,
    Paid,
    Failed,
}
