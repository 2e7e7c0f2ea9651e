use ask_relay::{build_app, config::AppConfig, config::SPA_ENTRY, run_server, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::from_env();
    let state = AppState::from_config(&cfg)?;
    let app = build_app(state);

    tracing::info!("Server is running on http://localhost:{}", cfg.port);
    if cfg.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set. OpenAI calls will likely fail.");
    } else {
        tracing::info!("OpenAI API key appears to be loaded");
        tracing::info!(
            "Frontend ({SPA_ENTRY}) should be accessible at http://localhost:{}/",
            cfg.port
        );
        tracing::info!(entry = %cfg.spa_entry().display(), "fallback route is active");
    }

    run_server(app, cfg.port).await?;
    Ok(())
}
