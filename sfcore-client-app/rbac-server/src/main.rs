// ============================================================================
// RBAC Server - Entry Point
// File: sfcore-client-app/rbac-server/src/main.rs
// ============================================================================

mod demo;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use rbac_api::AppState;
use rbac_core::memory::{InMemoryUnitOfWork, TracingAuditTrailSink};
use rbac_core::repositories::{AuditTrailSink, UnitOfWork};
use rbac_infrastructure::{create_pool, run_migrations, PgAuditTrailSink, PgUnitOfWork};
use rbac_security::{permissions, JwtService};
use rbac_shared::config::{AppConfig, StorageBackend};
use rbac_shared::telemetry::init_telemetry;

const DEMO_TOKEN_EXPIRY_SECS: i64 = 8 * 60 * 60;

fn demo_claims() -> Vec<String> {
    [
        permissions::dashboard::ADMIN_PANEL,
        permissions::group::READ,
        permissions::group::CREATE,
        permissions::group::UPDATE,
        permissions::group::DELETE,
        permissions::group_permission::READ,
        permissions::group_permission::CREATE,
        permissions::group_permission::DELETE,
        permissions::group_user::READ,
        permissions::group_user::CREATE,
        permissions::group_user::DELETE,
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

fn cors_layer(origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    Ok(match origin {
        Some(origin) => layer.allow_origin(origin.parse::<HeaderValue>()?),
        None => layer.allow_origin(Any),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let _log_guard = init_telemetry(&config.log)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    let (uow, audit): (Arc<dyn UnitOfWork>, Arc<dyn AuditTrailSink>) = match config.storage.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database).await?;
            if config.database.run_migrations {
                run_migrations(&pool).await?;
                info!("Database migrations applied");
            }
            info!("Database connection established");
            (
                Arc::new(PgUnitOfWork::new(pool.clone())),
                Arc::new(PgAuditTrailSink::new(pool)),
            )
        }
        StorageBackend::Memory => {
            warn!("In-memory storage selected; data is lost on restart");
            (
                Arc::new(InMemoryUnitOfWork::seeded(demo::seed())),
                Arc::new(TracingAuditTrailSink),
            )
        }
    };

    let jwt = JwtService::new(config.jwt.secret.clone(), config.jwt.issuer.clone());
    if config.storage.backend == StorageBackend::Memory {
        let token = jwt.generate_access_token(
            "USR000001",
            demo::DEMO_ORGANIZATION,
            rbac_shared::constants::DEFAULT_USER_TYPE,
            demo_claims(),
            DEMO_TOKEN_EXPIRY_SECS,
        )?;
        info!("Demo bearer token: {}", token);
    }

    let state = AppState::new(uow, audit, jwt, config.app.rate_limit_per_second);
    let app = rbac_api::router(state).layer(cors_layer(config.app.cors_origin.as_deref())?);

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
