use crate::dto::user_dto::{CreateUserPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, role, \
                            must_change_password, created_at, updated_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn create(&self, payload: CreateUserPayload) -> Result<User> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE username = $1 OR email = $2",
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .fetch_one(&self.pool)
        .await?;
        if exists > 0 {
            return Err(Error::BadRequest(
                "A user with this username or email already exists".into(),
            ));
        }

        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;
        let role = payload.role.unwrap_or_else(|| "user".to_string());

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name, role, must_change_password)
             VALUES ($1, $2, $3, $4, $5, $6, TRUE)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(payload.first_name.unwrap_or_default())
        .bind(payload.last_name.unwrap_or_default())
        .bind(&role)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET username = COALESCE($2, username),
                 email = COALESCE($3, email),
                 first_name = COALESCE($4, first_name),
                 last_name = COALESCE($5, last_name),
                 role = COALESCE($6, role),
                 must_change_password = COALESCE($7, must_change_password),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(payload.username)
        .bind(payload.email)
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.role)
        .bind(payload.must_change_password)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".into()));
        }
        Ok(())
    }

    pub async fn change_password(&self, id: Uuid, current: &str, new: &str) -> Result<()> {
        let user = self.get(id).await?;
        let ok = crypto::verify_password(current, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized("Current password is incorrect".into()));
        }

        let password_hash = crypto::hash_password(new)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;
        sqlx::query(
            "UPDATE users
             SET password_hash = $2, must_change_password = FALSE, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Bootstrap: create the seed admin account when the user table is
    /// empty and the seed env vars are configured.
    pub async fn ensure_seed_admin(&self, email: &str, password: &str) -> Result<Option<User>> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(None);
        }

        let username = email.split('@').next().unwrap_or("admin").to_string();
        let user = self
            .create(CreateUserPayload {
                username,
                email: email.to_string(),
                password: password.to_string(),
                first_name: None,
                last_name: None,
                role: Some("admin".to_string()),
            })
            .await?;
        tracing::info!(email = %user.email, "Seed admin account created");
        Ok(Some(user))
    }
}
