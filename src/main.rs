//! pickdesk entry point.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pickdesk::api::{serve, AppState};
use pickdesk::config::Config;
use pickdesk::metrics;
use pickdesk::probe::{default_targets, ProbeRunner};
use pickdesk::status::{Capability, CapabilityFlags, EnvCredentials, StatusReport};

use strum::IntoEnumIterator;

/// Frontend and model-status service for the picks product.
#[derive(Parser, Debug)]
#[command(name = "pickdesk")]
#[command(about = "Serves the picks frontend and model status endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the frontend and status endpoints (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration and credential presence.
    CheckConfig,

    /// Sweep a remote deployment's endpoints and print truncated responses.
    Probe {
        /// Base URL of the deployment.
        #[arg(long, env = "PROBE_BASE_URL", default_value = "http://localhost:8000")]
        base_url: String,

        /// Game id used for the player-props request.
        #[arg(long, default_value = "1")]
        game_id: String,

        /// Maximum characters of each body to print.
        #[arg(long, default_value = "500")]
        max_chars: usize,

        /// Per-request timeout in seconds.
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("pickdesk=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Probe {
            base_url,
            game_id,
            max_chars,
            timeout_secs,
        }) => cmd_probe(&base_url, &game_id, max_chars, timeout_secs).await,
        None => cmd_serve(None).await,
    }
}

/// Serve the HTTP API until shutdown.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = Config::load_validated().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    let handle = metrics::install_recorder()?;
    let _upkeep_handle = metrics::spawn_upkeep(handle.clone(), Duration::from_secs(5));
    let app_state = AppState::new(&config).with_metrics(handle);

    let flags = CapabilityFlags::read(&EnvCredentials);
    if !flags.all_configured() {
        for capability in Capability::iter().filter(|cap| !flags.get(*cap)) {
            info!("{} not set; {} unavailable", capability.env_var(), capability.feature_name());
        }
    }

    serve(&config, app_state).await?;
    Ok(())
}

/// Check configuration validity and credential presence.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PICKDESK - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}", config.bind_addr());
    println!("  Index File: {}", config.index_file.display());
    println!(
        "  Static Dir: {} ({})",
        config.static_dir.display(),
        if config.static_dir.is_dir() { "found" } else { "missing, mount skipped" }
    );

    let flags = CapabilityFlags::read(&EnvCredentials);
    println!("Credentials:");
    for capability in Capability::iter() {
        println!(
            "  {:<18} {:<10} {}",
            capability.env_var(),
            if flags.get(capability) { "set" } else { "NOT SET" },
            capability.feature_name()
        );
    }

    let report = StatusReport::build(flags, time::OffsetDateTime::now_utc());
    println!("======================================================================");
    println!("MODEL STATUS: {}", report.status.as_str().to_uppercase());
    println!("======================================================================");

    Ok(())
}

/// Sweep a remote deployment.
async fn cmd_probe(
    base_url: &str,
    game_id: &str,
    max_chars: usize,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PICKDESK - ENDPOINT PROBE");
    println!("======================================================================");
    println!("Base URL: {}", base_url);

    let runner = ProbeRunner::new(base_url, Duration::from_secs(timeout_secs), max_chars)?;
    let targets = default_targets(game_id);
    let summary = runner.run(&targets).await;

    for (i, result) in summary.results.iter().enumerate() {
        println!("\n{}. GET {}", i + 1, result.target.display());
        match &result.outcome {
            Ok(outcome) => {
                println!("   Status: {} ({} ms)", outcome.status, outcome.elapsed.as_millis());
                for line in outcome.body.lines() {
                    println!("   {}", line);
                }
            }
            Err(e) => {
                println!("   FAILED");
                println!("   Error: {}", e);
            }
        }
    }

    println!("\n======================================================================");
    println!(
        "PROBE COMPLETE: {}/{} responded",
        summary.responded(),
        summary.results.len()
    );
    println!("======================================================================");

    summary.into_result()?;
    Ok(())
}
