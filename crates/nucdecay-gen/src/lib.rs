//! # nucdecay-gen — Nuclear decay event generation.
//!
//! Physics samplers and the generator that drives them:
//! - **Spectrum shapes**: allowed single beta spectra with a relativistic
//!   Fermi function, and two-electron double beta spectra for 2νββ, 0νββ
//!   and Majoron modes, with angular correlations between the electrons and
//!   between de-excitation gammas.
//! - **Data tables**: double beta nuclides with their daughter levels, and
//!   branching decay schemes for single beta emitters and background sources.
//! - **Energy window**: rejection of candidates outside a kinetic energy sum
//!   window, with a running estimate of the accepted fraction.
//! - **Generator**: the configure / initialize / shoot / reset lifecycle.
//!
//! # Examples
//!
//! ```
//! use nucdecay_core::{DbdMode, DecayConfig, Event, RandUniform};
//! use nucdecay_gen::DecayGenerator;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut generator = DecayGenerator::with_config(
//!     DecayConfig::dbd("Mo100", 0, DbdMode::TwoNeutrino).with_window(2.0, 4.3),
//! );
//! generator.initialize().unwrap();
//!
//! let mut prng = RandUniform::new(StdRng::seed_from_u64(314159));
//! let mut event = Event::new();
//! generator.shoot(&mut prng, &mut event).unwrap();
//! assert!((2.0..=4.3).contains(&event.total_kinetic_energy()));
//! ```

pub mod beta;
pub mod dbd;
pub mod fermi;
pub mod generator;
pub mod kinematics;
pub mod nuclides;
pub mod registry;
pub mod schemes;
pub mod window;

pub use beta::BetaSpectrum;
pub use dbd::DoubleBetaSampler;
pub use generator::DecayGenerator;
pub use registry::{available_isotopes, resolve};
pub use schemes::SchemeSampler;
pub use window::EnergyWindowFilter;
