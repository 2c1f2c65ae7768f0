use tracing_subscriber::EnvFilter;

use safecare_api::config::ApiConfig;
use safecare_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ApiConfig::from_env();
    let state = AppState::new(&config).await?;
    let app = safecare_api::app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "safecare api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
