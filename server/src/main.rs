use streamline_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let config = Config::from_env();

    let log_dir = format!("{}/logs", config.work_dir);
    let _ = std::fs::create_dir_all(&log_dir);
    init_logger_with_file(std::env::var("LOG_LEVEL").ok().as_deref(), Some(&log_dir));

    tracing::info!(environment = %config.environment, "Streamline server starting...");

    let state = ServerState::initialize(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize server state: {e}"))?;

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(anyhow::anyhow!("{e}"));
    }

    Ok(())
}
