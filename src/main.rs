//! TAP CORS relay server.
//!
//! ```text
//!   Browser ──GET /tap/sync──▶ relay ──GET TAP/sync──▶ Exoplanet Archive
//!   Browser ◀──body + CORS──── relay ◀────body──────── Exoplanet Archive
//! ```

use std::path::PathBuf;

use clap::Parser;

use tap_cors_proxy::config::ConfigOverrides;
use tap_cors_proxy::lifecycle::startup;
use tap_cors_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "tap-cors-proxy")]
#[command(about = "CORS relay for the NASA Exoplanet Archive TAP service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, e.g. 127.0.0.1:8080.
    #[arg(short, long)]
    bind: Option<String>,

    /// Upstream TAP sync endpoint.
    #[arg(short, long)]
    upstream: Option<String>,

    /// Log level or filter directive.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::resolve_config(
        args.config.as_deref(),
        ConfigOverrides {
            bind_address: args.bind,
            upstream_url: args.upstream,
            log_level: args.log_level,
        },
    )?;

    logging::init(&config.observability)?;
    tracing::info!("tap-cors-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
