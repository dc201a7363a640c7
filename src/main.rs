use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use mailbox::{Config, Database, MailboxService, TokenService, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = mailbox::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        mailbox::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Mailbox - daily letter service");

    let db = match Database::open(&config.database.path, config.database.max_connections).await {
        Ok(db) => db,
        Err(e) => {
            error!(path = %config.database.path, "Failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tokens = Arc::new(TokenService::from_config(&config.auth));
    let service = MailboxService::new(db, tokens);

    let server = match WebServer::new(&config.server, service) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
