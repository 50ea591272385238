// Trade Cost Simulator - CLI entry point

use clap::{Parser, Subcommand};
use tracing::{error, info};

use trade_simulator::{Config, SimulationSession, SimulatorResult};

#[derive(Parser)]
#[command(name = "trade-sim")]
#[command(version = "0.1.0")]
#[command(about = "Trade execution cost simulator", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Estimate costs for one order against a single generated book
    Estimate {
        /// Order side (buy or sell)
        #[arg(short, long)]
        side: Option<trade_simulator::OrderSide>,

        /// Order quantity in base units
        #[arg(short, long)]
        quantity: Option<f64>,

        /// Fee tier (1-3)
        #[arg(short, long)]
        fee_tier: Option<usize>,

        /// Assumed volatility, percent
        #[arg(long)]
        volatility: Option<f64>,

        /// RNG seed for a reproducible book
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the periodic refresh session
    Run {
        /// Number of refresh cycles
        #[arg(short, long, default_value = "50")]
        ticks: u64,

        /// Override the refresh interval from config, milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the final statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging first (before config load so we can see config errors)
    let log_level = if cli.verbose { "debug" } else { "info" };
    std::env::set_var("RUST_LOG", log_level);
    tracing_subscriber::fmt::init();

    match cli.command {
        Commands::Init { force } => {
            init_config(&cli.config, force)?;
        }

        Commands::Estimate {
            side,
            quantity,
            fee_tier,
            volatility,
            seed,
            json,
        } => {
            let mut config = load_config(&cli.config)?;
            if let Some(side) = side {
                config.order.side = match side {
                    trade_simulator::OrderSide::Buy => "buy".to_string(),
                    trade_simulator::OrderSide::Sell => "sell".to_string(),
                };
            }
            if let Some(quantity) = quantity {
                config.order.quantity = quantity;
            }
            if let Some(tier) = fee_tier {
                config.order.fee_tier = tier;
            }
            if let Some(volatility) = volatility {
                config.order.volatility_pct = volatility;
            }
            config.validate()?;

            run_estimate(&config, seed, json)?;
        }

        Commands::Run {
            ticks,
            interval_ms,
            seed,
            json,
        } => {
            let mut config = load_config(&cli.config)?;
            if let Some(interval) = interval_ms {
                config.session.refresh_interval_ms = interval;
            }
            config.validate()?;

            run_session(&config, ticks, seed, json).await?;
        }
    }

    Ok(())
}

/// Load config from file when present, otherwise fall back to defaults
fn load_config(path: &str) -> SimulatorResult<Config> {
    if std::path::Path::new(path).exists() {
        info!("📁 Config: {}", path);
        Ok(Config::from_file(path)?)
    } else {
        info!("📁 No config at {}, using defaults (run 'trade-sim init' to create one)", path);
        Ok(Config::default())
    }
}

fn init_config(path: &str, force: bool) -> SimulatorResult<()> {
    if std::path::Path::new(path).exists() && !force {
        error!("❌ Config file already exists: {} (use --force to overwrite)", path);
        return Ok(());
    }

    let config = Config::default();
    config.to_file(path)?;
    info!("✅ Wrote default config to {}", path);
    Ok(())
}

fn run_estimate(config: &Config, seed: Option<u64>, json: bool) -> SimulatorResult<()> {
    let mut session = SimulationSession::from_config(config, seed)?;
    let report = session.estimate_once()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let estimate = &report.estimate;
    info!(
        "📖 Book: {} bids / {} asks | mid {:.2} | spread {:.2}",
        report.book.bids.len(),
        report.book.asks.len(),
        estimate.mid_price.unwrap_or(0.0),
        report.book.spread().unwrap_or(0.0)
    );
    match estimate.slippage_pct {
        Some(slippage) => info!("   Expected slippage:  {:.4}%", slippage),
        None => info!("   Expected slippage:  N/A"),
    }
    info!("   Expected fees:      ${:.2}", estimate.fees);
    info!("   Market impact:      {:.4}%", estimate.impact_pct);
    info!("   Total cost:         ${:.2}", estimate.total_cost);
    if estimate.is_partial_fill() {
        info!(
            "   Partial fill:       {:.4} of {:.4}",
            estimate.filled_quantity, estimate.requested_quantity
        );
    }

    Ok(())
}

async fn run_session(
    config: &Config,
    ticks: u64,
    seed: Option<u64>,
    json: bool,
) -> SimulatorResult<()> {
    let mut session = SimulationSession::from_config(config, seed)?;
    let stats = session.run(ticks).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        info!("📈 Avg latency: {:.1} ms", stats.average_latency_ms);
        if let Some(throughput) = session.latency().throughput() {
            info!("📈 Throughput: {:.1} updates/s", throughput);
        }
    }

    Ok(())
}
