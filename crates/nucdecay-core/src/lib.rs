//! # nucdecay-core
//! Foundation types and traits for the nucdecay event generator.

pub mod constants;
pub mod error;
pub mod event;
pub mod particle;
pub mod random;
pub mod traits;
pub mod types;

pub use error::{ConfigError, FormatError, GeneratorError, StateError};
pub use event::{Event, StoreFlags};
pub use particle::{Particle, ParticleCode};
pub use random::{RandUniform, UniformRandom};
pub use traits::SpectrumSampler;
pub use types::{DbdMode, DecayCategory, DecayConfig, EnergyWindow};
