use dotenvy::dotenv;
use tracing::info;

mod aspects;
mod config;
mod critique;
mod error;
mod handlers;
mod llm;
mod prompt;
mod state;
mod upload;
mod utils;

use config::Config;
use state::AppState;
use utils::logging::init_logging;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to install Ctrl-C handler: {err}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Missing API key aborts here, before logging is set up or any socket
    // is bound.
    let config = Config::load()?;
    let _guards = init_logging(&config.log_level);

    info!(
        "Starting PhotoCritique (model: {}, upload cap: {} bytes)",
        config.gemini_model, config.max_upload_bytes
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config);
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");
    Ok(())
}
