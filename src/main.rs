use checkout_backend::config::{AppConfig, StoreBackend};
use checkout_backend::http::router::build_router;
use checkout_backend::repo::in_memory::{InMemorySettingsStore, InMemoryStatusLog};
use checkout_backend::repo::settings_repo::PgSettingsRepo;
use checkout_backend::repo::status_checks_repo::PgStatusChecksRepo;
use checkout_backend::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let (state, pool) = match cfg.store_backend {
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(cfg.db_max_connections)
                .connect(&cfg.database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;

            let state = AppState::new(
                Arc::new(PgSettingsRepo { pool: pool.clone() }),
                Arc::new(PgStatusChecksRepo { pool: pool.clone() }),
                cfg.status_list_limit,
            );
            (state, Some(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory stores, data will not survive a restart");
            let state = AppState::new(
                Arc::new(InMemorySettingsStore::new()),
                Arc::new(InMemoryStatusLog::new()),
                cfg.status_list_limit,
            );
            (state, None)
        }
    };

    let app = build_router(state, &cfg);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {} (prefix {:?})", cfg.bind_addr, cfg.api_prefix);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("database pool closed");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
