//! Utility Split: CLI Server
//!
//! Headless bill allocation service suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/utility-split/config.toml)
//! utility-split-service
//!
//! # Custom config path
//! utility-split-service --config /etc/utility-split/config.toml
//!
//! # Override listen address
//! utility-split-service --host 127.0.0.1 --port 3000
//!
//! # Validate config without starting
//! utility-split-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use utility_split::config::AppConfig;
use utility_split::server::{init_tracing, ServerHandle, ServerOptions};

/// Utility Split: allocate shared electricity bills among co-owners.
#[derive(Parser, Debug)]
#[command(
    name = "utility-split-service",
    version,
    about = "REST service that splits electricity bills by metered consumption",
    long_about = "Utility Split: stateless REST API that allocates a bill's variable \
                  costs by each co-owner's consumption and shares fixed costs equally.\n\n\
                  Default config: ~/.config/utility-split/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "UTILITY_SPLIT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(utility_split::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Log level override must land before tracing is initialised
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            if cli.check {
                error!("Invalid configuration {}: {}", config_path.display(), e);
                return Err(e.into());
            }
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(host) = cli.host {
        info!("CLI override: host = {}", host);
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.address());
        println!("   Policy      : {}", config.allocation.unattributed_cost);
        println!("   Window      : {} months", config.allocation.monthly_window);
        println!("   Metrics     : {}", config.metrics.enabled);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions { config }).await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
