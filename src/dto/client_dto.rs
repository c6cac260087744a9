use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::client::Client;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_role: Option<String>,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub vat_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub contact_role: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub vat_number: Option<String>,
}

/// Public lead form. The address arrives split into parts and is
/// concatenated once, at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_role: Option<String>,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub notes: Option<String>,
    pub vat_number: Option<String>,
}

impl LeadPayload {
    pub fn address(&self) -> String {
        let city_line = match (self.postal_code.as_deref(), self.city.as_deref()) {
            (Some(postal), Some(city)) => format!("{} {}", postal, city),
            (Some(postal), None) => postal.to_string(),
            (None, Some(city)) => city.to_string(),
            (None, None) => String::new(),
        };
        [
            self.street.clone().unwrap_or_default(),
            city_line,
            self.country.clone().unwrap_or_default(),
        ]
        .into_iter()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: uuid::Uuid,
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

impl From<Client> for ClientResponse {
    fn from(value: Client) -> Self {
        Self {
            id: value.id,
            name: value.name,
            contact_person: value.contact_person,
            contact_role: value.contact_role,
            email: value.email,
            phone: value.phone,
            address: value.address,
            industry: value.industry,
            status: value.status,
            notes: value.notes,
            vat_number: value.vat_number,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> LeadPayload {
        LeadPayload {
            name: "Acme GmbH".into(),
            contact_person: None,
            contact_role: None,
            email: "office@acme.example".into(),
            phone: None,
            street: Some("Ringstrasse 1".into()),
            city: Some("Vienna".into()),
            postal_code: Some("1010".into()),
            country: Some("Austria".into()),
            industry: None,
            notes: None,
            vat_number: None,
        }
    }

    #[test]
    fn address_concatenates_all_parts() {
        assert_eq!(lead().address(), "Ringstrasse 1, 1010 Vienna, Austria");
    }

    #[test]
    fn address_skips_missing_parts() {
        let mut payload = lead();
        payload.street = None;
        payload.postal_code = None;
        assert_eq!(payload.address(), "Vienna, Austria");

        payload.city = None;
        payload.country = None;
        assert_eq!(payload.address(), "");
    }
}
