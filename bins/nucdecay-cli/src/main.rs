//! nucdecay command-line driver.
//!
//! Generates a file of decay events for one configured source, with a
//! run-info header describing the configuration and, when an energy window
//! is set, the fraction of the full spectrum it covers.

mod config;
mod run;
mod writer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use nucdecay_core::types::{DbdMode, DecayCategory, EnergyWindow};

use crate::config::RunConfig;

/// Nuclear decay event generator.
#[derive(Parser, Debug)]
#[command(name = "nucdecay-cli", version, about = "Generate nuclear decay events to a file")]
struct Args {
    /// JSON run configuration file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random engine seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of events to generate
    #[arg(long)]
    events: Option<usize>,

    /// Output event file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Decay category (single_beta, dbd, background)
    #[arg(long)]
    category: Option<DecayCategory>,

    /// Isotope name, e.g. Mo100
    #[arg(long)]
    isotope: Option<String>,

    /// Daughter energy level index (double beta only)
    #[arg(long)]
    level: Option<u32>,

    /// Double beta mode, numeric id or name (e.g. 4 or 2nubb)
    #[arg(long)]
    mode: Option<DbdMode>,

    /// Lower bound of the energy sum window (MeV)
    #[arg(long, requires = "window_upper")]
    window_lower: Option<f64>,

    /// Upper bound of the energy sum window (MeV)
    #[arg(long, requires = "window_lower")]
    window_upper: Option<f64>,

    /// Disable the energy window from the run file
    #[arg(long, conflicts_with_all = ["window_lower", "window_upper"])]
    no_window: bool,

    /// Source activity in Bq
    #[arg(long)]
    activity: Option<f64>,

    /// Give up on an event after this many energy window attempts
    #[arg(long)]
    max_attempts: Option<u64>,

    /// Do not store event times
    #[arg(long)]
    no_time: bool,

    /// Do not store particle names
    #[arg(long)]
    no_names: bool,

    /// Print every event to stderr
    #[arg(long)]
    print_events: bool,

    /// Print the shipped isotope tables as JSON and exit
    #[arg(long)]
    list: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format ("text" or "json")
    #[arg(long)]
    log_format: Option<String>,
}

impl Args {
    /// Start from the run file (or defaults) and apply command-line overrides.
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(events) = self.events {
            config.events = events;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(category) = self.category {
            // A new category invalidates the double beta specifics of the defaults.
            if config.decay.category != Some(category) {
                config.decay.mode = None;
                config.decay.level = 0;
                config.decay.energy_window = None;
            }
            config.decay.category = Some(category);
        }
        if let Some(isotope) = self.isotope {
            config.decay.isotope = Some(isotope);
        }
        if let Some(level) = self.level {
            config.decay.level = level;
        }
        if let Some(mode) = self.mode {
            config.decay.mode = Some(mode);
        }
        if let (Some(lower), Some(upper)) = (self.window_lower, self.window_upper) {
            config.decay.energy_window = Some(EnergyWindow::new(lower, upper));
        }
        if self.no_window {
            config.decay.energy_window = None;
        }
        if let Some(activity) = self.activity {
            config.activity = activity;
        }
        if self.max_attempts.is_some() {
            config.max_attempts = self.max_attempts;
        }
        if self.no_time {
            config.store_time = false;
        }
        if self.no_names {
            config.store_names = false;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list {
        let json = serde_json::to_string_pretty(&run::catalog())
            .context("failed to serialize isotope tables")?;
        println!("{json}");
        return Ok(());
    }

    let print_events = args.print_events;
    let config = args.into_config()?;
    init_logging(&config.log_level, &config.log_format);

    info!("nucdecay v{}", env!("CARGO_PKG_VERSION"));
    info!(
        category = ?config.decay.category,
        isotope = ?config.decay.isotope,
        level = config.decay.level,
        mode = ?config.decay.mode,
        window = ?config.decay.energy_window,
        "decay configuration"
    );

    let mut stderr = std::io::stderr();
    let dump: Option<&mut dyn std::io::Write> = if print_events {
        Some(&mut stderr as &mut dyn std::io::Write)
    } else {
        None
    };
    let summary = run::execute(&config, dump)?;

    info!(
        events = summary.events,
        attempts = summary.attempts,
        weight = ?summary.weight,
        output = %config.output.display(),
        "run complete"
    );
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text. `RUST_LOG` takes precedence over `level_str`.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .init();
    }
}
