use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A person in the talent pool. Nested sections (experience, education,
/// languages, certifications) are stored as JSON-encoded text columns;
/// skills keep their submission order in a native array column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub current_position: String,
    pub profile: String,
    pub experience: String,
    pub education: String,
    pub skills: Vec<String>,
    pub languages: String,
    pub certifications: String,
    pub hobbies: String,
    pub birth_date: String,
    pub summary: String,
    pub availability: String,
    pub linkedin_url: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
