use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub contact_person: String,
    pub contact_role: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub industry: String,
    pub status: String,
    pub notes: String,
    pub vat_number: String,
    pub created_at: DateTime<Utc>,
}
