//! Savings Admin Service
//!
//! Binary entry point: loads configuration, connects to PostgreSQL, runs
//! migrations, provisions the default admin, and serves the API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use dotenv::dotenv;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use savings_admin::{
    api::{create_router, rate_limit_middleware, AppState, RateLimiter},
    config::AppConfig,
    database,
    service::{AuthService, CustomerService, DashboardService, JwtService, TransactionService},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    log::info!("starting savings-admin v{}", savings_admin::VERSION);

    let config = AppConfig::from_env();
    config.validate()?;
    log::info!("configuration loaded and validated");

    let pool = database::create_pool(&config.database).await?;
    log::info!("database pool connected");

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("database migrations completed");

    let jwt_service = JwtService::new(config.jwt.secret.clone(), config.jwt.expires_hours);
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());

    // One-time idempotent provisioning step, outside the request path.
    let created = auth_service
        .ensure_default_admin(
            &config.admin.email,
            &config.admin.password,
            &config.admin.name,
        )
        .await?;
    if created {
        log::info!("bootstrap admin provisioned ({})", config.admin.email);
    }

    let state = AppState {
        auth_service: Arc::new(auth_service),
        customer_service: Arc::new(CustomerService::new(pool.clone())),
        transaction_service: Arc::new(TransactionService::new(pool.clone())),
        dashboard_service: Arc::new(DashboardService::new(pool.clone())),
        jwt_service: Arc::new(jwt_service),
    };

    let cors = CorsLayer::new()
        .allow_origin(config.cors.frontend_url.parse::<HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let limiter = RateLimiter::new(&config.rate_limit);
    let app = create_router(state)
        .layer(from_fn_with_state(limiter, rate_limit_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to install shutdown signal handler: {}", e);
    }
}
