use anyhow::Result;
use lucky_session::config::AppConfig;
use lucky_session::http::{router, AppState};
use lucky_session::store::create_session_store;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store = create_session_store(config.backend())?;
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, backend = config.backend_name(), "lucky-session listening");
    axum::serve(listener, app).await?;
    Ok(())
}
