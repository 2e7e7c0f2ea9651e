pub mod api;
pub mod config;
pub mod error;
pub mod upstream;

use std::{io, path::PathBuf, sync::Arc};

use axum::Router;

use config::AppConfig;
use upstream::CompletionClient;

pub struct AppState {
    pub client: CompletionClient,
    pub public_dir: PathBuf,
    pub spa_entry: PathBuf,
}

impl AppState {
    pub fn new(client: CompletionClient, public_dir: impl Into<PathBuf>) -> Arc<Self> {
        let public_dir = public_dir.into();
        Arc::new(Self {
            client,
            spa_entry: public_dir.join(config::SPA_ENTRY),
            public_dir,
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Arc<Self>, reqwest::Error> {
        let client = CompletionClient::from_config(cfg)?;
        Ok(Self::new(client, cfg.public_dir.clone()))
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
