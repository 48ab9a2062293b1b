use anyhow::Result;
use tokio::sync::watch;

use parv_engine::agent::DEFAULT_MODEL_ID;
use parv_engine::api;
use parv_engine::config::Config;
use parv_engine::logging;
use parv_engine::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = Config::from_env()?;
    tracing::info!(
        model = config.model_id.as_deref().unwrap_or("<unset>"),
        region = %config.region,
        "Starting parv agent..."
    );
    if config.model_id.is_none() {
        tracing::warn!(default = DEFAULT_MODEL_ID, "BEDROCK_MODEL_ID is not set, using the default model");
    }

    let state = AppState::from_config(config).await?;
    tracing::info!(tools = ?state.tools.names(), "tools registered");

    // Create shutdown channel for the API server
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut api_handle = tokio::spawn(async move {
        if let Err(e) = api::start_server(state, shutdown_rx).await {
            tracing::error!("API server crashed: {}", e);
        }
    });

    // Wait for Ctrl+C, or for the server to exit on its own
    let server_exited = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            false
        }
        _ = &mut api_handle => true,
    };

    if !server_exited {
        tracing::info!("Received shutdown signal...");
        let _ = shutdown_tx.send(true);
        let _ = api_handle.await;
    }

    tracing::info!("parv shutdown complete.");
    Ok(())
}
