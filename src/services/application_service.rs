use crate::dto::application_dto::{ApplicationListQuery, SubmitApplicationPayload};
use crate::error::{Error, Result};
use crate::mapper;
use crate::models::application::{Application, STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};
use crate::models::candidate::Candidate;
use crate::services::candidate_service::CANDIDATE_COLUMNS;
use sqlx::PgPool;
use uuid::Uuid;

const APPLICATION_COLUMNS: &str =
    "id, first_name, last_name, email, phone, current_position, skills, experience, education, \
     certifications, languages, hobbies, birth_date, summary, availability, cover_letter, status, \
     created_at, updated_at";

/// The application lifecycle: `pending` on submission, then exactly one
/// transition to `approved` (which derives a candidate) or `rejected`.
/// Both transitions require the row to still be `pending`; an application
/// that was already reviewed reads as not-found to them.
#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn submit(&self, payload: SubmitApplicationPayload) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (first_name, last_name, email, phone, current_position, skills,
                                       experience, education, certifications, languages, hobbies,
                                       birth_date, summary, availability, cover_letter, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, '{}')
             RETURNING {}",
            STATUS_PENDING, APPLICATION_COLUMNS
        ))
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(mapper::text_or_empty(payload.phone))
        .bind(mapper::text_or_empty(payload.current_position))
        .bind(mapper::skills_to_vec(payload.skills.as_ref()))
        .bind(mapper::nested_to_text(payload.experience.as_ref()))
        .bind(mapper::nested_to_text(payload.education.as_ref()))
        .bind(mapper::nested_to_text(payload.certifications.as_ref()))
        .bind(mapper::nested_to_text(payload.languages.as_ref()))
        .bind(mapper::text_or_empty(payload.hobbies))
        .bind(mapper::text_or_empty(payload.birth_date))
        .bind(mapper::text_or_empty(payload.summary))
        .bind(mapper::availability_or_default(payload.availability.as_deref()))
        .bind(mapper::text_or_empty(payload.cover_letter))
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    pub async fn list(&self, query: ApplicationListQuery) -> Result<Vec<Application>> {
        let applications = if let Some(status) = query.status {
            sqlx::query_as::<_, Application>(&format!(
                "SELECT {} FROM applications WHERE status = $1 ORDER BY created_at DESC",
                APPLICATION_COLUMNS
            ))
            .bind(status)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Application>(&format!(
                "SELECT {} FROM applications ORDER BY created_at DESC",
                APPLICATION_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await?
        };
        Ok(applications)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".into()))?;
        Ok(application)
    }

    /// Approve a pending application and derive a candidate from it.
    ///
    /// The status flip and the candidate insert run in one transaction, so
    /// a failed insert rolls the application back to `pending` instead of
    /// stranding an approved application with no candidate.
    pub async fn approve(&self, id: Uuid) -> Result<Candidate> {
        let mut tx = self.pool.begin().await?;

        let application = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications
             SET status = '{}', updated_at = NOW()
             WHERE id = $1 AND status = '{}'
             RETURNING {}",
            STATUS_APPROVED, STATUS_PENDING, APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found or already reviewed".into()))?;

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "INSERT INTO candidates (first_name, last_name, email, phone, current_position, skills,
                                     experience, education, certifications, languages, hobbies,
                                     birth_date, summary, availability, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 'active')
             RETURNING {}",
            CANDIDATE_COLUMNS
        ))
        .bind(&application.first_name)
        .bind(&application.last_name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.current_position)
        .bind(&application.skills)
        .bind(&application.experience)
        .bind(&application.education)
        .bind(&application.certifications)
        .bind(&application.languages)
        .bind(&application.hobbies)
        .bind(&application.birth_date)
        .bind(&application.summary)
        .bind(&application.availability)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(application_id = %id, candidate_id = %candidate.id, "Application approved");
        Ok(candidate)
    }

    /// Reject a pending application. Requires `pending` just like approve:
    /// the status filter keeps both transitions single-shot.
    pub async fn reject(&self, id: Uuid) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications
             SET status = '{}', updated_at = NOW()
             WHERE id = $1 AND status = '{}'
             RETURNING {}",
            STATUS_REJECTED, STATUS_PENDING, APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found or already reviewed".into()))?;
        tracing::info!(application_id = %id, "Application rejected");
        Ok(application)
    }

    /// Hard delete, independent of status.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Application not found".into()));
        }
        Ok(())
    }
}
