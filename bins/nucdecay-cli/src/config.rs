//! Run configuration: defaults, optional JSON file, command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use nucdecay_core::event::StoreFlags;
use nucdecay_core::types::{DbdMode, DecayConfig};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 314159;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Seed of the random engine.
    pub seed: u64,
    /// Number of events to generate.
    pub events: usize,
    /// Output event file.
    pub output: PathBuf,
    /// Source activity in Bq; event times are exponential with this rate.
    pub activity: f64,
    pub decay: DecayConfig,
    /// Per-event cap on energy window attempts.
    pub max_attempts: Option<u64>,
    /// Store the event time line.
    pub store_time: bool,
    /// Store particle names.
    pub store_names: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            events: 10,
            output: PathBuf::from("nucdecay_ex01.data"),
            activity: 2.0,
            decay: DecayConfig::dbd("Mo100", 0, DbdMode::TwoNeutrino).with_window(2.0, 4.3),
            max_attempts: None,
            store_time: true,
            store_names: true,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl RunConfig {
    /// Load a JSON run file. Missing fields take their default values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read run config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse run config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.activity.is_finite() && self.activity > 0.0) {
            bail!("activity must be a positive number of Bq, got {}", self.activity);
        }
        if self.log_format != "text" && self.log_format != "json" {
            bail!("log format must be \"text\" or \"json\", got {:?}", self.log_format);
        }
        Ok(())
    }

    pub fn store_flags(&self) -> StoreFlags {
        let mut flags = StoreFlags::NONE;
        if self.store_time {
            flags = flags | StoreFlags::EVENT_TIME;
        }
        if self.store_names {
            flags = flags | StoreFlags::PARTICLE_NAME;
        }
        flags
    }
}
