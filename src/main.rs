mod config;
mod handlers;
mod routes;
mod state;
mod translate;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("speech_translator=debug,tower_http=debug")),
        )
        .init();

    let config = load_config()?;

    let app_state = AppState::new(config.clone())?;

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.system_config.host, config.system_config.port).parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// First existing config file wins; defaults only when none exists.
fn load_config() -> Result<Config> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
        exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
        exe_dir.join("conf.json").to_str().map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    Config::discover(&config_paths)
}
