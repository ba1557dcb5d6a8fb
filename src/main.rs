mod app;
mod auth;
mod coins;
mod collection;
mod config;
mod db;
mod error;
mod extract;
mod refresh;
mod state;
mod stats;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "coinkeeper=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let seed = config.seed_on_startup;
    let state = AppState::init(config).await?;

    if seed {
        match refresh::services::seed_if_empty(&state).await {
            Ok(Some(count)) => tracing::info!(count, "catalogue seeded"),
            Ok(None) => tracing::debug!("catalogue already populated"),
            Err(e) => tracing::warn!(error = %e, "initial catalogue load failed; starting with what is stored"),
        }
    }

    let serve_config = state.config.clone();
    let app = app::build_app(state);
    app::serve(app, &serve_config).await
}
