use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// A public job-application submission awaiting review. Status starts at
/// `pending` and moves exactly once, to `approved` or `rejected`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub current_position: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
    pub certifications: String,
    pub languages: String,
    pub hobbies: String,
    pub birth_date: String,
    pub summary: String,
    pub availability: String,
    pub cover_letter: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
