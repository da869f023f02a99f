//! Error types for the nucdecay generator.
use thiserror::Error;

use crate::types::{DbdMode, DecayCategory};

/// Invalid or unresolvable generator configuration. Raised only by `initialize`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing decay category")] MissingCategory,
    #[error("missing isotope")] MissingIsotope,
    #[error("unknown isotope {isotope} for category {category}")] UnknownIsotope { category: DecayCategory, isotope: String },
    #[error("missing double beta decay mode")] MissingMode,
    #[error("decay mode {mode} does not apply to category {category}")] ModeNotApplicable { category: DecayCategory, mode: DbdMode },
    #[error("daughter level {level} does not apply to category {category}")] LevelNotApplicable { category: DecayCategory, level: u32 },
    #[error("unknown daughter level {level} for isotope {isotope}")] UnknownLevel { isotope: String, level: u32 },
    #[error("mode {mode} cannot populate level {level} of {isotope}")] ModeLevelMismatch { isotope: String, level: u32, mode: DbdMode },
    #[error("inverted energy window: lower {lower} > upper {upper}")] InvertedWindow { lower: f64, upper: f64 },
    #[error("invalid energy window bound: {0}")] InvalidWindow(f64),
    #[error("energy window lower bound {lower} exceeds spectrum maximum {max}")] WindowAboveSpectrum { lower: f64, max: f64 },
    #[error("energy window upper bound {upper} is below spectrum minimum {min}")] WindowBelowSpectrum { upper: f64, min: f64 },
    #[error("max attempts must be positive")] ZeroMaxAttempts,
}

/// Operation called in the wrong lifecycle phase.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("generator is already initialized")] AlreadyInitialized,
    #[error("generator is not initialized")] NotInitialized,
}

/// Malformed event text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unexpected end of input while reading {0}")] UnexpectedEof(&'static str),
    #[error("invalid {field} at line {line}: {value}")] InvalidField { field: &'static str, line: usize, value: String },
    #[error("unknown particle code {code} at line {line}")] UnknownParticle { code: u32, line: usize },
    #[error("io: {0}")] Io(String),
}

impl From<std::io::Error> for FormatError {
    fn from(e: std::io::Error) -> Self {
        FormatError::Io(e.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error(transparent)] Config(#[from] ConfigError),
    #[error(transparent)] State(#[from] StateError),
    #[error("energy window not reached after {attempts} attempts")] WindowUnreachable { attempts: u64 },
}
