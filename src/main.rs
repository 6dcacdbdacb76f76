use std::path::PathBuf;
use std::sync::Arc;

use bookswap::config::{Cli, Config, StoreKind, default_config_path};
use bookswap::handler::AppState;
use bookswap::store::{BookStore, LibsqlStore, MemoryStore};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    let config_path = args
        .config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("bookswap.svc starting");
    if let Ok(path) = dotenv {
        tracing::info!(path = ?path, "loaded environment file");
    }

    let cfg = Config::new(&config_path).unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?config_path, "failed to load config file");
        std::process::exit(1);
    });

    let store: Arc<dyn BookStore> = match cfg.store.kind {
        StoreKind::Remote => Arc::new(
            LibsqlStore::connect(&cfg.store.url, &cfg.store.auth_token, &cfg.store.table)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!(error = %bookswap::unpack_error(&e), "failed to connect to book store");
                    std::process::exit(1);
                }),
        ),
        StoreKind::Memory => {
            tracing::warn!("running with in-memory book store, listings are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let app = bookswap::router(AppState::new(store), &cfg.app.allowed_origins);

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    let cancellation_token = CancellationToken::new();
    let ctrl_c_token = cancellation_token.clone();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
            return;
        }
        tracing::info!("ctrl+c signal received, preparing to shutdown");
        ctrl_c_token.cancel();
    });

    tracing::info!("bookswap.svc running on {}", &address);
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(cancellation_token.cancelled_owned())
        .await
    {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }

    tracing::info!("bookswap.svc going off, graceful shutdown complete");
}
