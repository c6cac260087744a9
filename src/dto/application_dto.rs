use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::models::application::Application;

/// Public submission payload. There is deliberately no `status` field: a
/// submitter-supplied status is ignored and every new application starts
/// out `pending`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationPayload {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub current_position: Option<String>,
    pub skills: Option<JsonValue>,
    pub experience: Option<JsonValue>,
    pub education: Option<JsonValue>,
    pub certifications: Option<JsonValue>,
    pub languages: Option<JsonValue>,
    pub hobbies: Option<String>,
    pub birth_date: Option<String>,
    pub summary: Option<String>,
    pub availability: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: uuid::Uuid,
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

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            current_position: value.current_position,
            skills: value.skills,
            experience: value.experience,
            education: value.education,
            certifications: value.certifications,
            languages: value.languages,
            hobbies: value.hobbies,
            birth_date: value.birth_date,
            summary: value.summary,
            availability: value.availability,
            cover_letter: value.cover_letter,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
