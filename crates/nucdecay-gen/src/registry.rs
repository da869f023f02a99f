//! Resolution of a [`DecayConfig`] into a spectrum sampler.
//!
//! Selection is a pure function of (category, isotope, mode, level). Every
//! invalid combination is reported here so that sampling itself never fails.

use tracing::debug;

use nucdecay_core::error::ConfigError;
use nucdecay_core::traits::SpectrumSampler;
use nucdecay_core::types::{DecayCategory, DecayConfig};

use crate::dbd::{DoubleBetaSampler, accepts_level};
use crate::nuclides::{self, DBD_NUCLIDES};
use crate::schemes::{self, SchemeSampler};

/// Build the sampler for `config`. The energy window is not inspected.
pub fn resolve(config: &DecayConfig) -> Result<Box<dyn SpectrumSampler>, ConfigError> {
    let category = config.category.ok_or(ConfigError::MissingCategory)?;
    let isotope = config.isotope.as_deref().ok_or(ConfigError::MissingIsotope)?;

    let sampler: Box<dyn SpectrumSampler> = match category {
        DecayCategory::DoubleBeta => {
            let nuclide = nuclides::find(isotope).ok_or_else(|| ConfigError::UnknownIsotope {
                category,
                isotope: isotope.to_string(),
            })?;
            let mode = config.mode.ok_or(ConfigError::MissingMode)?;
            let level = nuclide.level(config.level).ok_or_else(|| ConfigError::UnknownLevel {
                isotope: isotope.to_string(),
                level: config.level,
            })?;
            if !accepts_level(mode, level.spin) {
                return Err(ConfigError::ModeLevelMismatch {
                    isotope: isotope.to_string(),
                    level: config.level,
                    mode,
                });
            }
            let sampler = DoubleBetaSampler::new(nuclide, config.level, mode).ok_or_else(|| {
                ConfigError::UnknownLevel { isotope: isotope.to_string(), level: config.level }
            })?;
            Box::new(sampler)
        }
        DecayCategory::SingleBeta | DecayCategory::Background => {
            let scheme =
                schemes::find(category, isotope).ok_or_else(|| ConfigError::UnknownIsotope {
                    category,
                    isotope: isotope.to_string(),
                })?;
            if let Some(mode) = config.mode {
                return Err(ConfigError::ModeNotApplicable { category, mode });
            }
            if config.level != 0 {
                return Err(ConfigError::LevelNotApplicable { category, level: config.level });
            }
            Box::new(SchemeSampler::new(scheme))
        }
    };

    debug!(
        category = %category,
        isotope,
        description = %sampler.description(),
        "spectrum sampler resolved"
    );
    Ok(sampler)
}

/// Names of the isotopes shipped for `category`, in table order.
pub fn available_isotopes(category: DecayCategory) -> Vec<&'static str> {
    match category {
        DecayCategory::DoubleBeta => DBD_NUCLIDES.iter().map(|n| n.name).collect(),
        other => schemes::schemes(other).iter().map(|s| s.name).collect(),
    }
}
