use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use meddevvi_server::config::ServerConfig;
use meddevvi_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::new(&config.data_dir)?;

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(
        bind = %config.bind,
        data_dir = %config.data_dir.display(),
        "meddevvi listening"
    );

    axum::serve(listener, meddevvi_server::app(state)).await?;
    Ok(())
}
