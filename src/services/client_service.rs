use crate::dto::client_dto::{CreateClientPayload, UpdateClientPayload};
use crate::error::{Error, Result};
use crate::models::client::Client;
use sqlx::PgPool;
use uuid::Uuid;

const CLIENT_COLUMNS: &str = "id, name, contact_person, contact_role, email, phone, address, \
                              industry, status, notes, vat_number, created_at";

#[derive(Clone)]
pub struct ClientService {
    pool: PgPool,
}

impl ClientService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateClientPayload) -> Result<Client> {
        let status = payload.status.unwrap_or_else(|| "pending".to_string());
        let client = sqlx::query_as::<_, Client>(&format!(
            "INSERT INTO clients (name, contact_person, contact_role, email, phone, address, industry, status, notes, vat_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {}",
            CLIENT_COLUMNS
        ))
        .bind(&payload.name)
        .bind(payload.contact_person.unwrap_or_default())
        .bind(payload.contact_role.unwrap_or_default())
        .bind(&payload.email)
        .bind(payload.phone.unwrap_or_default())
        .bind(payload.address.unwrap_or_default())
        .bind(payload.industry.unwrap_or_default())
        .bind(&status)
        .bind(payload.notes.unwrap_or_default())
        .bind(payload.vat_number.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;
        Ok(client)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Client> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {} FROM clients WHERE id = $1",
            CLIENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Client not found".into()))?;
        Ok(client)
    }

    pub async fn list(&self) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {} FROM clients ORDER BY created_at DESC",
            CLIENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateClientPayload) -> Result<Client> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "UPDATE clients
             SET name = COALESCE($2, name),
                 contact_person = COALESCE($3, contact_person),
                 contact_role = COALESCE($4, contact_role),
                 email = COALESCE($5, email),
                 phone = COALESCE($6, phone),
                 address = COALESCE($7, address),
                 industry = COALESCE($8, industry),
                 status = COALESCE($9, status),
                 notes = COALESCE($10, notes),
                 vat_number = COALESCE($11, vat_number)
             WHERE id = $1
             RETURNING {}",
            CLIENT_COLUMNS
        ))
        .bind(id)
        .bind(payload.name)
        .bind(payload.contact_person)
        .bind(payload.contact_role)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.address)
        .bind(payload.industry)
        .bind(payload.status)
        .bind(payload.notes)
        .bind(payload.vat_number)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Client not found".into()))?;
        Ok(client)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Client not found".into()));
        }
        Ok(())
    }
}
