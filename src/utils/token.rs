use crate::middleware::auth::Claims;
use crate::models::user::User;
use jsonwebtoken::{encode, DecodingKey, EncodingKey, Header, Validation};

/// Sign a bearer token carrying the user's identity. The secret is passed
/// in explicitly so callers outside the running server (tests, seeds) can
/// sign without touching the global config.
pub fn issue_token(user: &User, secret: &str, ttl_minutes: i64) -> anyhow::Result<String> {
    let exp = chrono::Utc::now() + chrono::Duration::minutes(ttl_minutes);
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.display_name(),
        role: user.role.clone(),
        exp: exp.timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn verify_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            password_hash: String::new(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            role: "user".into(),
            must_change_password: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let user = sample_user();
        let token = issue_token(&user, "unit-secret", 60).expect("sign");
        let claims = verify_token(&token, "unit-secret").expect("verify");
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "jdoe@example.com");
        assert_eq!(claims.name, "Jane Doe");
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&sample_user(), "secret-a", 60).expect("sign");
        assert!(verify_token(&token, "secret-b").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "old@example.com".into(),
            name: "Old Token".into(),
            role: "user".into(),
            exp: (Utc::now() - chrono::Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"unit-secret"),
        )
        .expect("sign");
        assert!(verify_token(&token, "unit-secret").is_err());
    }
}
