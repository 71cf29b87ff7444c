use std::{process::ExitCode, sync::Arc};

use notes_api::{
    config::{Config, StoreBackend},
    handlers,
    readiness::{self, ReadinessError},
    repository::{self, MemoryNoteStore, NoteStore, PgNoteStore, StoreError},
    service::NoteService,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] envy::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("database unavailable: {0}")]
    NotReady(#[from] ReadinessError<StoreError>),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Failed to start server: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    // Fetch env variables
    let cfg = Config::from_env()?;
    tracing::info!("Loaded configuration: {:?}", cfg);

    let store = open_store(&cfg).await?;

    // Service creation
    let service = Arc::new(NoteService::new(store));
    let router = handlers::router(service);

    let listener = tokio::net::TcpListener::bind(cfg.listen_addr()).await?;
    tracing::info!("Server running, listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Build the configured store. For PostgreSQL this blocks until the
/// database answers or the retry budget runs out, then applies migrations.
async fn open_store(cfg: &Config) -> Result<Arc<dyn NoteStore>, StartupError> {
    match cfg.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store, notes are lost on restart");
            Ok(Arc::new(MemoryNoteStore::new()))
        }
        StoreBackend::Postgres => {
            let store = PgNoteStore::new(cfg)?;

            readiness::await_ready(cfg.retry_policy(), "PostgreSQL", || store.ping()).await?;

            if cfg.run_migrations {
                repository::migrate(cfg).await?;
            }

            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
