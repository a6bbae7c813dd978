//! API Middleware
//!
//! Bearer-token authentication, role authorization, and the global
//! fixed-window rate limiter.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;

use crate::api::AppState;
use crate::config::RateLimitConfig;
use crate::models::auth::AdminContext;
use crate::utils::error::{AppError, AppResult};

/// Extension type carrying the authenticated admin through the request
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub AdminContext);

/// Authentication middleware for all protected routes
///
/// Validates the bearer token, re-checks that the admin row still exists and
/// is active, and attaches the principal to request extensions. Handlers past
/// this point trust the attached context and never re-check identity.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            AppError::Authentication("No token provided. Authorization required.".into())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Authentication("Invalid Authorization header format".into())
    })?;

    let context = state.jwt_service.verify(token)?;

    if !state.auth_service.is_active_admin(context.id).await? {
        return Err(AppError::Authentication(
            "Admin account not found or inactive".into(),
        ));
    }

    request.extensions_mut().insert(AuthAdmin(context));
    Ok(next.run(request).await)
}

/// Set-membership role check against a per-route allow-list
pub fn authorize_roles(admin: &AdminContext, allowed: &[&str]) -> AppResult<()> {
    if allowed.contains(&admin.role.as_str()) {
        Ok(())
    } else {
        Err(AppError::Authorization("Insufficient permissions".into()))
    }
}

/// Shared fixed-window request counter keyed by client IP
#[derive(Clone)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    hits: Arc<Mutex<HashMap<IpAddr, WindowState>>>,
}

#[derive(Debug, Clone, Copy)]
struct WindowState {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            window: Duration::from_secs(config.window_seconds),
            max_requests: config.max_requests,
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record one request for the given client; error when over the cap
    pub async fn check(&self, client: IpAddr) -> AppResult<()> {
        let now = Instant::now();
        let mut hits = self.hits.lock().await;

        // Evict expired windows so the map does not grow with every distinct
        // client ever seen.
        hits.retain(|_, state| now.duration_since(state.started) < self.window);

        let state = hits.entry(client).or_insert(WindowState {
            started: now,
            count: 0,
        });

        state.count += 1;
        if state.count > self.max_requests {
            return Err(AppError::RateLimit(
                "Too many requests, please try again later".into(),
            ));
        }
        Ok(())
    }
}

/// Global rate-limiting middleware
///
/// Reads the peer address from request extensions when the server is built
/// `with_connect_info`; requests without one (tests, some proxies) share a
/// single bucket.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    limiter.check(client).await?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn admin(role: &str) -> AdminContext {
        AdminContext {
            id: Uuid::new_v4(),
            email: "admin@creditjambo.com".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn role_allow_list_membership() {
        assert!(authorize_roles(&admin("super_admin"), &["super_admin", "admin"]).is_ok());
        assert!(matches!(
            authorize_roles(&admin("viewer"), &["super_admin", "admin"]),
            Err(AppError::Authorization(_))
        ));
    }

    #[tokio::test]
    async fn limiter_blocks_after_cap() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            window_seconds: 60,
            max_requests: 3,
        });
        let client = IpAddr::V4(Ipv4Addr::LOCALHOST);

        for _ in 0..3 {
            assert!(limiter.check(client).await.is_ok());
        }
        assert!(matches!(
            limiter.check(client).await,
            Err(AppError::RateLimit(_))
        ));
    }

    #[tokio::test]
    async fn limiter_tracks_clients_independently() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            window_seconds: 60,
            max_requests: 1,
        });

        let a = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let b = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
        assert!(limiter.check(a).await.is_ok());
        assert!(limiter.check(b).await.is_ok());
        assert!(limiter.check(a).await.is_err());
    }

    #[tokio::test]
    async fn limiter_evicts_expired_windows() {
        let limiter = RateLimiter::new(&RateLimitConfig {
            window_seconds: 60,
            max_requests: 1,
        });

        let stale = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        limiter.hits.lock().await.insert(
            stale,
            WindowState {
                started: Instant::now() - Duration::from_secs(120),
                count: 1,
            },
        );

        let fresh = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
        assert!(limiter.check(fresh).await.is_ok());
        assert!(!limiter.hits.lock().await.contains_key(&stale));

        // The stale client gets a clean window again.
        assert!(limiter.check(stale).await.is_ok());
    }
}
