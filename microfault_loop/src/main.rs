//! # MicroFault Loop Binary
//!
//! Periodic caller for the fault registry: loads a fault table from TOML,
//! applies the startup activations and resolves the most severe active
//! fault once per period, reporting each result through `tracing`.
//!
//! # Usage
//!
//! ```bash
//! # Resolve every 10 ms until Ctrl-C
//! microfault_loop --config config/faults.toml
//!
//! # Five ticks, clear everything after the first one
//! microfault_loop -c config/faults.toml --ticks 5 --clear-after 1
//!
//! # Verbose JSON logs
//! microfault_loop -c config/faults.toml -v --json
//! ```

#![deny(warnings)]

mod ticker;

use clap::Parser;
use microfault::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ticker::FaultTicker;

/// MicroFault Loop - periodic most-severe-fault resolver
#[derive(Parser, Debug)]
#[command(name = "microfault_loop")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Periodic fault resolver driven by a TOML fault table")]
#[command(long_about = None)]
struct Args {
    /// Path to the fault table configuration.
    #[arg(short, long, default_value = "config/faults.toml")]
    config: PathBuf,

    /// Resolve period in milliseconds.
    #[arg(long, default_value_t = 10)]
    period_ms: u64,

    /// Stop after this many ticks (0 = run until Ctrl-C).
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Clear all faults after this many ticks (at least 1).
    #[arg(long, value_name = "TICKS", value_parser = clap::value_parser!(u64).range(1..))]
    clear_after: Option<u64>,

    /// Enable verbose logging (overrides the configured log level)
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("MicroFault loop failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = MicroFaultConfig::load(&args.config);
    let log_level = config
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    let config = config?;
    info!(
        "MicroFault loop v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        config.shared.service_name
    );

    let registry = config.build_registry::<DefaultCode, MAX_FAULTS>()?;
    info!(
        count = registry.count(),
        active = registry.active_count(),
        order = ?registry.order(),
        code_bits = FAULTCODE_BIT_WIDTH,
        "Fault table registered from {}",
        args.config.display()
    );

    let shared = Arc::new(SharedRegistry::from_registry(registry));

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || {
            info!("Received shutdown signal");
            running.store(false, Ordering::SeqCst);
        })?;
    }

    let period = Duration::from_millis(args.period_ms);
    let mut ticker = FaultTicker::new(Arc::clone(&shared));

    while running.load(Ordering::SeqCst) {
        ticker.tick();

        if args.clear_after == Some(ticker.ticks()) {
            shared.disable_all();
            info!(tick = ticker.ticks(), "All faults cleared");
        }
        if args.ticks != 0 && ticker.ticks() >= args.ticks {
            break;
        }
        std::thread::sleep(period);
    }

    let last = ticker.last();
    info!(
        ticks = ticker.ticks(),
        "MicroFault loop stopped, last fault: {} {:#04x}",
        last.level,
        last.code
    );
    Ok(())
}

/// Setup tracing subscriber from CLI arguments and the configured level.
///
/// `RUST_LOG` wins over both.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        configured
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
