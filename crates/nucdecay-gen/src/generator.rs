//! Decay event generator: configuration, initialization, sampling and reset.
//!
//! ```text
//! Unconfigured --initialize--> Initialized --shoot*--> Initialized
//!       ^                                                   |
//!       +----------------------- reset ---------------------+
//! ```
//!
//! Configuration can only change while unconfigured. `initialize` resolves
//! the spectrum sampler and validates the energy window; any failure leaves
//! the generator unconfigured. The random engine is borrowed per `shoot`
//! and never retained.

use tracing::debug;

use nucdecay_core::constants::GENERATOR_LABEL;
use nucdecay_core::error::{ConfigError, GeneratorError, StateError};
use nucdecay_core::event::Event;
use nucdecay_core::random::UniformRandom;
use nucdecay_core::traits::SpectrumSampler;
use nucdecay_core::types::{DbdMode, DecayCategory, DecayConfig, EnergyWindow};

use crate::registry;
use crate::window::EnergyWindowFilter;

/// State owned by one initialized phase.
#[derive(Debug)]
struct RuntimeState {
    sampler: Box<dyn SpectrumSampler>,
    filter: Option<EnergyWindowFilter>,
    /// Calls to `shoot` without a window.
    shots: u64,
}

#[derive(Debug, Default)]
pub struct DecayGenerator {
    config: DecayConfig,
    max_attempts: Option<u64>,
    state: Option<RuntimeState>,
}

impl DecayGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator pre-loaded with `config`, still unconfigured.
    pub fn with_config(config: DecayConfig) -> Self {
        Self { config, ..Self::default() }
    }

    fn ensure_unconfigured(&self) -> Result<(), StateError> {
        match self.state {
            Some(_) => Err(StateError::AlreadyInitialized),
            None => Ok(()),
        }
    }

    // --- configuration ---

    pub fn set_decay_category(&mut self, category: DecayCategory) -> Result<(), StateError> {
        self.ensure_unconfigured()?;
        self.config.category = Some(category);
        Ok(())
    }

    pub fn set_isotope(&mut self, isotope: &str) -> Result<(), StateError> {
        self.ensure_unconfigured()?;
        self.config.isotope = Some(isotope.to_string());
        Ok(())
    }

    pub fn set_mode(&mut self, mode: DbdMode) -> Result<(), StateError> {
        self.ensure_unconfigured()?;
        self.config.mode = Some(mode);
        Ok(())
    }

    pub fn set_level(&mut self, level: u32) -> Result<(), StateError> {
        self.ensure_unconfigured()?;
        self.config.level = level;
        Ok(())
    }

    /// Restrict generation to events whose kinetic energy sum lies in
    /// `[lower, upper]` MeV. Bounds are validated by `initialize`.
    pub fn set_energy_window(&mut self, lower: f64, upper: f64) -> Result<(), StateError> {
        self.ensure_unconfigured()?;
        self.config.energy_window = Some(EnergyWindow::new(lower, upper));
        Ok(())
    }

    pub fn clear_energy_window(&mut self) -> Result<(), StateError> {
        self.ensure_unconfigured()?;
        self.config.energy_window = None;
        Ok(())
    }

    /// Cap the number of candidates drawn per `shoot` when a window is set.
    pub fn set_max_attempts(&mut self, max_attempts: Option<u64>) -> Result<(), StateError> {
        self.ensure_unconfigured()?;
        self.max_attempts = max_attempts;
        Ok(())
    }

    pub fn set_config(&mut self, config: DecayConfig) -> Result<(), StateError> {
        self.ensure_unconfigured()?;
        self.config = config;
        Ok(())
    }

    // --- lifecycle ---

    pub fn initialize(&mut self) -> Result<(), GeneratorError> {
        self.ensure_unconfigured()?;

        if self.max_attempts == Some(0) {
            return Err(ConfigError::ZeroMaxAttempts.into());
        }
        let sampler = registry::resolve(&self.config)?;

        let filter = match self.config.energy_window {
            Some(window) => {
                window.validate()?;
                if let Some(max) = sampler.max_energy_sum() {
                    if window.lower > max {
                        let lower = window.lower;
                        return Err(ConfigError::WindowAboveSpectrum { lower, max }.into());
                    }
                }
                if let Some(min) = sampler.min_energy_sum() {
                    if window.upper < min {
                        let upper = window.upper;
                        return Err(ConfigError::WindowBelowSpectrum { upper, min }.into());
                    }
                }
                Some(EnergyWindowFilter::new(window, self.max_attempts))
            }
            None => None,
        };

        debug!(
            sampler = %sampler.description(),
            window = ?self.config.energy_window,
            max_attempts = ?self.max_attempts,
            "generator initialized"
        );
        self.state = Some(RuntimeState { sampler, filter, shots: 0 });
        Ok(())
    }

    /// Generate one decay into `event`.
    ///
    /// The event is expected to be cleared by the caller. On success it holds
    /// at least one particle, its time is 0 and its generator label is set.
    pub fn shoot(
        &mut self,
        prng: &mut dyn UniformRandom,
        event: &mut Event,
    ) -> Result<(), GeneratorError> {
        let state = self.state.as_mut().ok_or(StateError::NotInitialized)?;

        event.set_time(0.0);
        event.set_generator(GENERATOR_LABEL);
        match state.filter.as_mut() {
            Some(filter) => filter.shoot(&mut *state.sampler, prng, event)?,
            None => {
                state.sampler.shoot(prng, event);
                state.shots += 1;
            }
        }
        Ok(())
    }

    /// Discard the sampler, filter and counters. The configuration is kept.
    pub fn reset(&mut self) {
        if let Some(state) = self.state.take() {
            debug!(
                attempts = state.filter.as_ref().map_or(state.shots, EnergyWindowFilter::attempts),
                "generator reset"
            );
        }
    }

    // --- accessors ---

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    pub fn category(&self) -> Option<DecayCategory> {
        self.config.category
    }

    pub fn isotope(&self) -> Option<&str> {
        self.config.isotope.as_deref()
    }

    pub fn mode(&self) -> Option<DbdMode> {
        self.config.mode
    }

    pub fn level(&self) -> u32 {
        self.config.level
    }

    pub fn energy_window(&self) -> Option<EnergyWindow> {
        self.config.energy_window
    }

    pub fn has_energy_window(&self) -> bool {
        self.config.energy_window.is_some()
    }

    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    /// Description of the resolved sampler, once initialized.
    pub fn sampler_description(&self) -> Option<String> {
        self.state.as_ref().map(|s| s.sampler.description())
    }

    /// Candidate decays drawn since `initialize`.
    pub fn attempts(&self) -> u64 {
        match &self.state {
            Some(RuntimeState { filter: Some(f), .. }) => f.attempts(),
            Some(state) => state.shots,
            None => 0,
        }
    }

    /// Decays returned to the caller since `initialize`.
    pub fn accepted(&self) -> u64 {
        match &self.state {
            Some(RuntimeState { filter: Some(f), .. }) => f.accepted(),
            Some(state) => state.shots,
            None => 0,
        }
    }

    /// Fraction of the full spectrum inside the energy window, estimated as
    /// `accepted / attempts`.
    ///
    /// `Some(1.0)` when initialized without a window; `None` when
    /// unconfigured or before the first accepted event.
    pub fn normalization_weight(&self) -> Option<f64> {
        let state = self.state.as_ref()?;
        match &state.filter {
            Some(f) => f.weight(),
            None => Some(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nucdecay_core::random::RandUniform;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prng(seed: u64) -> RandUniform<StdRng> {
        RandUniform::new(StdRng::seed_from_u64(seed))
    }

    fn mo100() -> DecayGenerator {
        DecayGenerator::with_config(DecayConfig::dbd("Mo100", 0, DbdMode::TwoNeutrino))
    }

    #[test]
    fn shoot_requires_initialize() {
        let mut g = mo100();
        let mut r = prng(1);
        let mut e = Event::new();
        assert_eq!(
            g.shoot(&mut r, &mut e),
            Err(GeneratorError::State(StateError::NotInitialized))
        );
        assert!(e.is_empty());
    }

    #[test]
    fn setters_rejected_after_initialize() {
        let mut g = mo100();
        g.initialize().unwrap();
        assert_eq!(g.set_isotope("Xe136"), Err(StateError::AlreadyInitialized));
        assert_eq!(g.set_level(1), Err(StateError::AlreadyInitialized));
        assert_eq!(g.set_mode(DbdMode::NeutrinolessMass), Err(StateError::AlreadyInitialized));
        assert_eq!(g.set_energy_window(1.0, 2.0), Err(StateError::AlreadyInitialized));
        assert_eq!(g.clear_energy_window(), Err(StateError::AlreadyInitialized));
        assert_eq!(
            g.set_decay_category(DecayCategory::Background),
            Err(StateError::AlreadyInitialized)
        );
        assert_eq!(g.set_max_attempts(Some(3)), Err(StateError::AlreadyInitialized));
        assert_eq!(g.set_config(DecayConfig::default()), Err(StateError::AlreadyInitialized));
        assert_eq!(g.isotope(), Some("Mo100"));
    }

    #[test]
    fn double_initialize_rejected() {
        let mut g = mo100();
        g.initialize().unwrap();
        assert_eq!(
            g.initialize(),
            Err(GeneratorError::State(StateError::AlreadyInitialized))
        );
        assert!(g.is_initialized());
    }

    #[test]
    fn failed_initialize_stays_unconfigured() {
        let mut g = DecayGenerator::with_config(DecayConfig::dbd("Mo100", 7, DbdMode::TwoNeutrino));
        assert!(matches!(
            g.initialize(),
            Err(GeneratorError::Config(ConfigError::UnknownLevel { level: 7, .. }))
        ));
        assert!(!g.is_initialized());
        g.set_level(0).unwrap();
        g.initialize().unwrap();
    }

    #[test]
    fn window_checked_at_initialize() {
        let mut g = mo100();
        g.set_energy_window(4.3, 2.0).unwrap();
        assert_eq!(
            g.initialize(),
            Err(GeneratorError::Config(ConfigError::InvertedWindow { lower: 4.3, upper: 2.0 }))
        );

        g.set_energy_window(3.5, 4.0).unwrap();
        assert_eq!(
            g.initialize(),
            Err(GeneratorError::Config(ConfigError::WindowAboveSpectrum {
                lower: 3.5,
                max: 3.0344
            }))
        );

        g.set_max_attempts(Some(0)).unwrap();
        g.set_energy_window(2.0, 3.0).unwrap();
        assert_eq!(
            g.initialize(),
            Err(GeneratorError::Config(ConfigError::ZeroMaxAttempts))
        );
        assert!(!g.is_initialized());
    }

    #[test]
    fn window_below_spectrum_rejected() {
        // Every Mo100 event feeding the excited 0+ level carries 1.130 MeV of gammas.
        let mut g = DecayGenerator::with_config(
            DecayConfig::dbd("Mo100", 2, DbdMode::TwoNeutrino).with_window(0.0, 1.0),
        );
        assert!(matches!(
            g.initialize(),
            Err(GeneratorError::Config(ConfigError::WindowBelowSpectrum { upper: 1.0, .. }))
        ));
        assert!(!g.is_initialized());

        // Every Am241 event carries an alpha above 5.44 MeV.
        let mut g = DecayGenerator::with_config(
            DecayConfig::source(DecayCategory::Background, "Am241").with_window(0.0, 1.0),
        );
        let err = g.initialize().unwrap_err();
        let GeneratorError::Config(ConfigError::WindowBelowSpectrum { min, .. }) = err else {
            panic!("unexpected error {err:?}");
        };
        assert!(min > 5.44, "{min}");

        // A window reaching the minimum is accepted and reachable.
        g.set_energy_window(0.0, 5.6).unwrap();
        g.initialize().unwrap();
        let mut r = prng(9);
        let mut e = Event::new();
        g.shoot(&mut r, &mut e).unwrap();
        assert!(e.total_kinetic_energy() <= 5.6);
    }

    #[test]
    fn shoot_without_window_counts_calls() {
        let mut g = mo100();
        g.initialize().unwrap();
        assert_eq!(g.normalization_weight(), Some(1.0));

        let mut r = prng(2);
        let mut e = Event::new();
        for _ in 0..25 {
            e.reset();
            g.shoot(&mut r, &mut e).unwrap();
            assert_eq!(e.len(), 2);
            assert_eq!(e.time, 0.0);
            assert_eq!(e.generator.as_deref(), Some(GENERATOR_LABEL));
        }
        assert_eq!(g.attempts(), 25);
        assert_eq!(g.accepted(), 25);
        assert_eq!(g.normalization_weight(), Some(1.0));
    }

    #[test]
    fn window_restricts_energy_sum() {
        let mut g = mo100();
        g.set_energy_window(2.0, 4.3).unwrap();
        g.initialize().unwrap();
        assert_eq!(g.normalization_weight(), None);

        let mut r = prng(314159);
        let mut e = Event::new();
        for _ in 0..10 {
            e.reset();
            g.shoot(&mut r, &mut e).unwrap();
            let esum = e.total_kinetic_energy();
            assert!((2.0..=4.3).contains(&esum), "{esum}");
        }
        assert_eq!(g.accepted(), 10);
        assert!(g.attempts() >= 10);
        let w = g.normalization_weight().unwrap();
        assert!(w > 0.0 && w <= 1.0);
    }

    #[test]
    fn reset_is_idempotent_and_keeps_config() {
        let mut g = mo100();
        g.set_energy_window(1.0, 2.0).unwrap();
        g.initialize().unwrap();
        let mut r = prng(3);
        let mut e = Event::new();
        g.shoot(&mut r, &mut e).unwrap();

        g.reset();
        g.reset();
        assert!(!g.is_initialized());
        assert_eq!(g.attempts(), 0);
        assert_eq!(g.normalization_weight(), None);
        assert_eq!(g.energy_window(), Some(EnergyWindow::new(1.0, 2.0)));

        g.clear_energy_window().unwrap();
        g.set_isotope("Xe136").unwrap();
        g.initialize().unwrap();
        assert!(!g.has_energy_window());
        assert!(g.sampler_description().unwrap().starts_with("Xe136"));
    }

    #[test]
    fn accessors_reflect_config() {
        let g = mo100();
        assert_eq!(g.category(), Some(DecayCategory::DoubleBeta));
        assert_eq!(g.mode(), Some(DbdMode::TwoNeutrino));
        assert_eq!(g.level(), 0);
        assert!(!g.has_energy_window());
        assert_eq!(g.max_attempts(), None);
        assert_eq!(g.sampler_description(), None);
        assert_eq!(g.config(), &DecayConfig::dbd("Mo100", 0, DbdMode::TwoNeutrino));
    }

    #[test]
    fn same_seed_same_events() {
        let run = |seed| {
            let config = DecayConfig::source(DecayCategory::Background, "Co60");
            let mut g = DecayGenerator::with_config(config);
            g.initialize().unwrap();
            let mut r = prng(seed);
            let mut out = Vec::new();
            for _ in 0..20 {
                let mut e = Event::new();
                g.shoot(&mut r, &mut e).unwrap();
                out.push(e);
            }
            out
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }

    #[test]
    fn unreachable_window_with_cap() {
        // The Mo100 2νββ sum spectrum is vanishingly small just below Q.
        let mut g = mo100();
        g.set_energy_window(3.0343, 3.0344).unwrap();
        g.set_max_attempts(Some(100)).unwrap();
        g.initialize().unwrap();
        let mut r = prng(4);
        let mut e = Event::new();
        assert_eq!(
            g.shoot(&mut r, &mut e),
            Err(GeneratorError::WindowUnreachable { attempts: 100 })
        );
        assert!(e.is_empty());
        assert_eq!(g.normalization_weight(), None);
    }
}
