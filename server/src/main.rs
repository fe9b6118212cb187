use app::config::Config;
use app::db;
use app::repositories::{DbDriverStore, DbSessionProvider};
use migration::{Migrator, MigratorTrait};
use server_lib::routes::{AppState, create_router};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    info!("Connecting to database: {}", config.database_url);
    let db = db::init_database(&config.database_url).await?;

    info!("Running migrations...");
    Migrator::up(&db, None).await?;

    if let Some(ref seed) = config.seed {
        info!("Seeding database from .env configuration...");
        app::seed::seed_from_config(&db, seed).await?;
    }

    let state = AppState {
        sessions: Arc::new(DbSessionProvider::new(db.clone())),
        drivers: Arc::new(DbDriverStore::new(db)),
    };

    let app = create_router(state, config.track_cache_ttl);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down gracefully...");
}
