use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use timecard_rules::api::{AppState, create_router};
use timecard_rules::config::ConfigLoader;

const CONFIG_ENV: &str = "TIMECARD_RULES_CONFIG";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let config_dir = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let address = config.engine().listen_address.clone();
    info!(
        config_dir = %config_dir,
        engine = %config.engine().name,
        version = %config.engine().version,
        contracts = config.contracts().count(),
        "Configuration loaded"
    );

    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(address = %address, error = %err, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(address = %address, "Listening");

    let router = create_router(AppState::new(config));
    if let Err(err) = axum::serve(listener, router).await {
        error!(error = %err, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
