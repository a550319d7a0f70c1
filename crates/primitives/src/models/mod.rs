pub mod app_config;
pub mod dtos;
pub mod entities;

pub use app_config::AppConfig;
pub use entities::booking::Booking;
pub use entities::driver_payout_account::{DriverPayoutAccount, NewDriverPayoutAccount};
pub use entities::enum_types::{
    BookingPaymentStatus, BookingStatus, PaymentStatus, PayoutMode, PayoutStatus, SettlementStatus,
};
pub use entities::payout::{NewPayout, Payout};
pub use entities::transaction::{NewTransaction, Transaction};
pub use entities::user::User;
