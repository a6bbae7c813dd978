//! Admin Model
//!
//! Administrator accounts for the back office. The internal row carries the
//! password hash; `AdminProfile` is the sanitized shape returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Internal admin representation including the password hash
///
/// Never exposed in API responses; convert to [`AdminProfile`] first.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin profile for API responses, without credential material
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        AdminProfile {
            id: admin.id,
            email: admin.email,
            name: admin.name,
            role: admin.role,
            is_active: admin.is_active,
            last_login: admin.last_login,
            created_at: admin.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_conversion_strips_password_hash() {
        let admin = Admin {
            id: Uuid::new_v4(),
            email: "admin@creditjambo.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            name: "Admin".to_string(),
            role: "super_admin".to_string(),
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let profile: AdminProfile = admin.clone().into();
        assert_eq!(profile.email, admin.email);
        assert_eq!(profile.role, "super_admin");

        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"isActive\":true"));
    }
}
