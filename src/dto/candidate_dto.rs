use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::models::candidate::Candidate;

/// Nested sections (experience, education, languages, certifications) and
/// skills come in either as JSON structures or as plain strings; the field
/// mapper normalizes them before storage.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub current_position: Option<String>,
    pub profile: Option<String>,
    pub experience: Option<JsonValue>,
    pub education: Option<JsonValue>,
    pub skills: Option<JsonValue>,
    pub languages: Option<JsonValue>,
    pub certifications: Option<JsonValue>,
    pub hobbies: Option<String>,
    pub birth_date: Option<String>,
    pub summary: Option<String>,
    pub availability: Option<String>,
    pub linkedin_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub current_position: Option<String>,
    pub profile: Option<String>,
    pub experience: Option<JsonValue>,
    pub education: Option<JsonValue>,
    pub skills: Option<JsonValue>,
    pub languages: Option<JsonValue>,
    pub certifications: Option<JsonValue>,
    pub hobbies: Option<String>,
    pub birth_date: Option<String>,
    pub summary: Option<String>,
    pub availability: Option<String>,
    pub linkedin_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: uuid::Uuid,
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

impl From<Candidate> for CandidateResponse {
    fn from(value: Candidate) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            location: value.location,
            current_position: value.current_position,
            profile: value.profile,
            experience: value.experience,
            education: value.education,
            skills: value.skills,
            languages: value.languages,
            certifications: value.certifications,
            hobbies: value.hobbies,
            birth_date: value.birth_date,
            summary: value.summary,
            availability: value.availability,
            linkedin_url: value.linkedin_url,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
