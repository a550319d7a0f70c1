use chrono::{DateTime, Utc};
use diesel::{Identifiable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Directory row maintained by the identity service; read-only here.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub upi_vpa: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
