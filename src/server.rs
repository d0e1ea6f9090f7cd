//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, and Axum server lifecycle.

use crate::application::services::RateLimitPolicy;
use crate::config::{CacheConfig, Config, DatabaseConfig};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache, connect_redis};
use crate::infrastructure::persistence::{
    PgCreatorRepository, PgLinkRepository, TimedCreatorRepository, TimedLinkRepository,
};
use crate::infrastructure::rate_limit::{
    MemoryRateLimitStore, RateLimitStore, RedisRateLimitStore,
};
use crate::routes::app_router;
use crate::state::{AppSettings, AppState};
use crate::utils::clock::SystemClock;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Opens the PostgreSQL pool with the configured limits and applies migrations.
///
/// Every session gets `statement_timeout` set to the query timeout.
///
/// # Errors
///
/// Returns an error if the URL is malformed, the database is unreachable or a
/// migration fails.
pub async fn connect_database(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .options([(
            "statement_timeout",
            format!("{}ms", config.query_timeout.as_millis()),
        )]);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

/// Connects to Redis if configured. A failed connection is logged and treated as
/// "not configured".
pub async fn connect_cache(config: &CacheConfig) -> Option<ConnectionManager> {
    let redis_url = config.redis_url.as_deref()?;

    match connect_redis(redis_url).await {
        Ok(manager) => Some(manager),
        Err(e) => {
            tracing::warn!(
                "Failed to connect to Redis: {}. Falling back to local-only caching.",
                e
            );
            None
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache and rate-limit store (or in-process fallbacks)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = Arc::new(connect_database(&config.database).await?);

    let (cache, rate_limit_store): (Arc<dyn CacheService>, Arc<dyn RateLimitStore>) =
        match connect_cache(&config.cache).await {
            Some(manager) => {
                tracing::info!("Distributed cache enabled (Redis)");
                (
                    Arc::new(RedisCache::new(
                        manager.clone(),
                        config.cache.ttl_seconds,
                        config.cache.timeout,
                    )),
                    Arc::new(RedisRateLimitStore::new(manager, config.cache.timeout)),
                )
            }
            None => {
                tracing::info!("Distributed cache disabled (NullCache)");
                (
                    Arc::new(NullCache::new()),
                    Arc::new(MemoryRateLimitStore::new()),
                )
            }
        };

    let settings = AppSettings {
        app_name: config.server.app_name.clone(),
        anarchy: config.server.anarchy,
        behind_proxy: config.server.behind_proxy,
    };

    let query_timeout = config.database.query_timeout;
    let state = AppState::from_parts(
        Arc::new(TimedLinkRepository::new(
            Arc::new(PgLinkRepository::new(pool.clone())),
            query_timeout,
        )),
        Arc::new(TimedCreatorRepository::new(
            Arc::new(PgCreatorRepository::new(pool)),
            query_timeout,
        )),
        cache,
        rate_limit_store,
        Arc::new(SystemClock),
        RateLimitPolicy::new(config.create_limit.max_requests, config.create_limit.window),
        settings,
    );

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let listen_addr = &config.server.listen_addr;
    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
