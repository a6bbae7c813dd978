//! Auth Service
//!
//! Admin login, profile lookup, and the one-time default-admin bootstrap.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::admin::{Admin, AdminProfile};
use crate::models::auth::LoginResponse;
use crate::service::jwt::JwtService;
use crate::utils::error::{AppError, AppResult};
use crate::utils::security::{hash_password, verify_password};
use crate::utils::validation::normalize_email;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Authentication service for admin accounts
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: JwtService) -> Self {
        Self { pool, jwt }
    }

    /// Authenticate an admin and issue a session token
    ///
    /// Unknown email and wrong password produce the same generic error so the
    /// endpoint cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let email = normalize_email(email);

        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !admin.is_active {
            return Err(AppError::Authentication(
                "Account is inactive. Please contact administrator.".to_string(),
            ));
        }

        if !verify_password(password, &admin.password_hash)? {
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let admin = sqlx::query_as::<_, Admin>(
            "UPDATE admins SET last_login = NOW(), updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(admin.id)
        .fetch_one(&self.pool)
        .await?;

        let token = self.jwt.issue(admin.id, &admin.email, &admin.role)?;

        Ok(LoginResponse {
            token,
            admin: AdminProfile::from(admin),
        })
    }

    /// Fetch the caller's own admin record
    pub async fn profile(&self, admin_id: Uuid) -> AppResult<AdminProfile> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(admin_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

        Ok(AdminProfile::from(admin))
    }

    /// Whether an admin row exists and is active; used by the auth middleware
    /// so revoked accounts lose access before their tokens expire
    pub async fn is_active_admin(&self, admin_id: Uuid) -> AppResult<bool> {
        let active =
            sqlx::query_scalar::<_, bool>("SELECT is_active FROM admins WHERE id = $1")
                .bind(admin_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(active.unwrap_or(false))
    }

    /// Create the default admin account if none exists with the given email
    ///
    /// Idempotent provisioning step run once at startup, outside the request
    /// path. Returns true when an account was created.
    pub async fn ensure_default_admin(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> AppResult<bool> {
        let email = normalize_email(email);

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins WHERE email = $1")
            .bind(&email)
            .fetch_one(&self.pool)
            .await?;

        if existing > 0 {
            log::debug!("default admin {} already provisioned", email);
            return Ok(false);
        }

        let password_hash = hash_password(password)?;

        // ON CONFLICT guards against two instances bootstrapping at once.
        let inserted = sqlx::query(
            r#"
            INSERT INTO admins (email, password_hash, name, role, is_active)
            VALUES ($1, $2, $3, 'super_admin', TRUE)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(name)
        .execute(&self.pool)
        .await?;

        let created = inserted.rows_affected() > 0;
        if created {
            log::info!("default admin account created for {}", email);
        }
        Ok(created)
    }
}
