//! Authentication Models
//!
//! JWT claims and the authenticated principal attached to requests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::admin::AdminProfile;

/// JWT claim set for admin access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Authenticated principal extracted from a validated token
///
/// Handlers trust this context; identity is never re-checked past the
/// auth middleware.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl From<&Claims> for AdminContext {
    fn from(claims: &Claims) -> Self {
        AdminContext {
            id: claims.sub,
            email: claims.email.clone(),
            role: claims.role.clone(),
        }
    }
}

/// Response payload for a successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn context_mirrors_claims() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "admin@creditjambo.com".to_string(),
            role: "super_admin".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };

        let context = AdminContext::from(&claims);
        assert_eq!(context.id, claims.sub);
        assert_eq!(context.email, claims.email);
        assert_eq!(context.role, claims.role);
    }
}
