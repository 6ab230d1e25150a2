use std::path::Path;

use dietplan::{app, config, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_files = config::load_env_files(Path::new("."));

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "dietplan=debug,axum=info,tower_http=info".to_string());
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

    tracing::debug!(?env_files, "loaded env files");

    let app_state = AppState::init()?;
    app::serve(app::build_app(app_state)).await
}
