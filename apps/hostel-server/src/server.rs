//! Process wiring: database pool, HTTP middleware stack and the serve loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use authn_resolver_sdk::AuthNResolverClient;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use complaints::Complaints;
use http::StatusCode;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use static_authn_plugin::StaticAuthNService;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;
use tracing::info;

use crate::config::{AppConfig, DatabaseConfig, ServerConfig};

/// Open the connection pool described by `cfg`.
///
/// # Errors
/// Returns an error if the datastore cannot be reached.
pub async fn connect_database(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let busy_timeout = Duration::from_millis(cfg.busy_timeout_ms);
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.max_connections(cfg.max_conns)
        .min_connections(cfg.min_conns)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .sqlx_logging(false)
        .map_sqlx_sqlite_opts(move |o| o.busy_timeout(busy_timeout));

    Database::connect(opts)
        .await
        .context("failed to connect to the database")
}

/// Wrap the complaints router in the HTTP middleware stack.
///
/// Layer order, outermost first: trace, timeout, body limit, CORS.
#[must_use]
pub fn build_router(
    cfg: &ServerConfig,
    complaints: &Complaints,
    authn_client: Arc<dyn AuthNResolverClient>,
) -> Router {
    let mut router = complaints.router(authn_client);

    if cfg.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router = router
        .layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes))
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes));

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        Duration::from_secs(cfg.request_timeout_secs),
    ));

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    )
}

/// Connect, optionally migrate, and serve until a shutdown signal arrives.
///
/// # Errors
/// Returns an error if the database, the listener or the server fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", cfg.server.bind_addr))?;

    let db = connect_database(&cfg.database).await?;
    if cfg.database.run_migrations {
        Complaints::migrate(&db)
            .await
            .context("failed to apply migrations")?;
    }

    let complaints = Complaints::new(db, cfg.complaints);
    let authn_client: Arc<dyn AuthNResolverClient> =
        Arc::new(StaticAuthNService::from_config(&cfg.authn));
    let router = build_router(&cfg.server, &complaints, authn_client);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("HTTP server bound on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

/// Apply migrations and exit.
///
/// # Errors
/// Returns an error if the database is unreachable or a migration fails.
pub async fn migrate(cfg: &DatabaseConfig) -> anyhow::Result<()> {
    let db = connect_database(cfg).await?;
    Complaints::migrate(&db)
        .await
        .context("failed to apply migrations")?;
    info!("Migrations applied");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown signal handler");
        std::future::pending::<()>().await;
    }
    info!("HTTP server shutting down gracefully");
}
