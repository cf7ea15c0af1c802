use sitedesk_server::{AppConfig, AppState, ServerBuilder};

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else)
    // This allows environment variables to be set from .env for local development
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist - it's optional
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    sitedesk_server::observability::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    let addr = match config.addr() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Server initialization failed: {e}");
            std::process::exit(2);
        }
    };

    tracing::info!(
        idp_domain = %config.auth.idp_domain,
        site_id = ?config.auth.site_id(),
        "Configuration loaded"
    );

    let server = ServerBuilder::new(addr, state)
        .with_allowed_origins(config.cors_allowed_origins.clone())
        .build();

    if let Err(err) = server.run().await {
        eprintln!("Server error: {err}");
    }
}
