use pos_server::{setup_environment, Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment()?;

    tracing::info!("POS order server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (opens the order database)
    let state = ServerState::initialize(&config);

    // 4. Run the HTTP server until shutdown
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
