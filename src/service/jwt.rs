//! JWT Service
//!
//! Stateless HS256 access tokens for admin sessions. Tokens carry the admin
//! id, email, and role; expiry is configurable and validated on decode.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::models::auth::{AdminContext, Claims};
use crate::utils::error::{AppError, AppResult};

/// Token signing and verification service
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    expires_in: Duration,
}

impl JwtService {
    pub fn new(secret: String, expires_hours: i64) -> Self {
        Self {
            secret,
            expires_in: Duration::hours(expires_hours),
        }
    }

    /// Issue a signed token for the given admin identity
    pub fn issue(&self, id: Uuid, email: &str, role: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: id,
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expires_in).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Validate a token and extract the authenticated principal
    pub fn verify(&self, token: &str) -> AppResult<AdminContext> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))?;

        Ok(AdminContext::from(&data.claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret".to_string(), 24)
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let jwt = service();
        let id = Uuid::new_v4();
        let token = jwt.issue(id, "admin@creditjambo.com", "super_admin").unwrap();

        let context = jwt.verify(&token).unwrap();
        assert_eq!(context.id, id);
        assert_eq!(context.email, "admin@creditjambo.com");
        assert_eq!(context.role, "super_admin");
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = JwtService::new("other-secret".to_string(), 24)
            .issue(Uuid::new_v4(), "admin@creditjambo.com", "admin")
            .unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let expired = JwtService {
            secret: "test-secret".to_string(),
            expires_in: Duration::hours(-1),
        };
        let token = expired
            .issue(Uuid::new_v4(), "admin@creditjambo.com", "admin")
            .unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(service().verify("not.a.token").is_err());
    }
}
