//! Payoff Engine Binary
//!
//! Analyses one strategy and prints the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin payoff-engine -- tests/fixtures/iron_condor.json
//! ```
//!
//! The request file holds a market and a list of legs:
//!
//! ```json
//! {
//!   "market": { "spot": 100.0, "time_to_expiry": 0.0822, "volatility": 0.3 },
//!   "legs": [
//!     { "leg_type": "CALL", "direction": "LONG", "strike": "100", "quantity": 1 }
//!   ]
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `PAYOFF_ENGINE_CONFIG`: Path to a YAML config file (defaults when unset)
//! - `RUST_LOG`: Log filter (overrides the configured level)

use anyhow::{Context, Result, bail};

use payoff_engine::AnalysisRequest;
use payoff_engine::config::load_config_from_env;
use payoff_engine::telemetry::init_logging;

fn main() -> Result<()> {
    let Some(request_path) = std::env::args().nth(1) else {
        bail!("usage: payoff-engine <request.json>");
    };

    let config = load_config_from_env().context("failed to load configuration")?;
    init_logging(&config.observability.logging);

    let contents = std::fs::read_to_string(&request_path)
        .with_context(|| format!("failed to read request file '{request_path}'"))?;
    let request: AnalysisRequest = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse request file '{request_path}'"))?;

    tracing::info!(
        path = %request_path,
        legs = request.legs.len(),
        spot = request.market.spot,
        "analysing strategy"
    );

    let analysis = request
        .run(&config)
        .with_context(|| format!("analysis failed for '{request_path}'"))?;

    let output = serde_json::to_string_pretty(&analysis).context("failed to serialize analysis")?;
    println!("{output}");

    Ok(())
}
