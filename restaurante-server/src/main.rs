use restaurante_server::{Config, Server, ServerState, init_logger_with_file};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );

    tracing::info!(
        "Starting restaurante-server v{} (env: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let state = ServerState::initialize(&config).await?;
    Server::with_state(config, state).run().await?;

    Ok(())
}
