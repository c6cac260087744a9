use crate::dto::candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::mapper;
use crate::models::candidate::Candidate;
use sqlx::PgPool;
use uuid::Uuid;

pub const CANDIDATE_COLUMNS: &str =
    "id, first_name, last_name, email, phone, location, current_position, profile, experience, \
     education, skills, languages, certifications, hobbies, birth_date, summary, availability, \
     linkedin_url, status, created_at, updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "INSERT INTO candidates (first_name, last_name, email, phone, location, current_position, profile,
                                     experience, education, skills, languages, certifications, hobbies,
                                     birth_date, summary, availability, linkedin_url, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
             RETURNING {}",
            CANDIDATE_COLUMNS
        ))
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(mapper::text_or_empty(payload.phone))
        .bind(mapper::text_or_empty(payload.location))
        .bind(mapper::text_or_empty(payload.current_position))
        .bind(mapper::text_or_empty(payload.profile))
        .bind(mapper::nested_to_text(payload.experience.as_ref()))
        .bind(mapper::nested_to_text(payload.education.as_ref()))
        .bind(mapper::skills_to_vec(payload.skills.as_ref()))
        .bind(mapper::nested_to_text(payload.languages.as_ref()))
        .bind(mapper::nested_to_text(payload.certifications.as_ref()))
        .bind(mapper::text_or_empty(payload.hobbies))
        .bind(mapper::text_or_empty(payload.birth_date))
        .bind(mapper::text_or_empty(payload.summary))
        .bind(mapper::availability_or_default(payload.availability.as_deref()))
        .bind(mapper::text_or_empty(payload.linkedin_url))
        .bind(payload.status.unwrap_or_else(|| "active".to_string()))
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {} FROM candidates WHERE id = $1",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".into()))?;
        Ok(candidate)
    }

    pub async fn list(&self) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {} FROM candidates ORDER BY created_at DESC",
            CANDIDATE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCandidatePayload) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "UPDATE candidates
             SET first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 email = COALESCE($4, email),
                 phone = COALESCE($5, phone),
                 location = COALESCE($6, location),
                 current_position = COALESCE($7, current_position),
                 profile = COALESCE($8, profile),
                 experience = COALESCE($9, experience),
                 education = COALESCE($10, education),
                 skills = COALESCE($11, skills),
                 languages = COALESCE($12, languages),
                 certifications = COALESCE($13, certifications),
                 hobbies = COALESCE($14, hobbies),
                 birth_date = COALESCE($15, birth_date),
                 summary = COALESCE($16, summary),
                 availability = COALESCE($17, availability),
                 linkedin_url = COALESCE($18, linkedin_url),
                 status = COALESCE($19, status),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            CANDIDATE_COLUMNS
        ))
        .bind(id)
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.location)
        .bind(payload.current_position)
        .bind(payload.profile)
        .bind(mapper::nested_patch(payload.experience.as_ref()))
        .bind(mapper::nested_patch(payload.education.as_ref()))
        .bind(mapper::skills_patch(payload.skills.as_ref()))
        .bind(mapper::nested_patch(payload.languages.as_ref()))
        .bind(mapper::nested_patch(payload.certifications.as_ref()))
        .bind(payload.hobbies)
        .bind(payload.birth_date)
        .bind(payload.summary)
        .bind(mapper::availability_patch(payload.availability.as_deref()))
        .bind(payload.linkedin_url)
        .bind(payload.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".into()))?;
        Ok(candidate)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Candidate not found".into()));
        }
        Ok(())
    }
}
