//! Energy window rejection filter.
//!
//! Candidates are drawn until the kinetic energy sum of one decay lies inside
//! the window. The running ratio `accepted / attempts` estimates the fraction
//! of the full spectrum covered by the window.

use tracing::trace;

use nucdecay_core::error::GeneratorError;
use nucdecay_core::event::Event;
use nucdecay_core::random::UniformRandom;
use nucdecay_core::traits::SpectrumSampler;
use nucdecay_core::types::EnergyWindow;

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyWindowFilter {
    window: EnergyWindow,
    attempts: u64,
    accepted: u64,
    /// Per-shoot cap on draws; `None` retries forever.
    max_attempts: Option<u64>,
}

impl EnergyWindowFilter {
    /// The window must already be validated.
    pub fn new(window: EnergyWindow, max_attempts: Option<u64>) -> Self {
        Self { window, attempts: 0, accepted: 0, max_attempts }
    }

    pub fn window(&self) -> EnergyWindow {
        self.window
    }

    /// Draw candidates from `sampler` into `event` until one is accepted.
    ///
    /// Particles already in `event` are left alone; only the particles of
    /// rejected candidates are removed. On [`GeneratorError::WindowUnreachable`]
    /// the event holds none of the drawn particles.
    pub fn shoot(
        &mut self,
        sampler: &mut dyn SpectrumSampler,
        prng: &mut dyn UniformRandom,
        event: &mut Event,
    ) -> Result<(), GeneratorError> {
        let base = event.len();
        let mut tries = 0u64;
        loop {
            sampler.shoot(prng, event);
            self.attempts += 1;
            tries += 1;

            let esum: f64 = event.particles[base..].iter().map(|p| p.kinetic_energy()).sum();
            if self.window.contains(esum) {
                self.accepted += 1;
                trace!(esum, tries, "candidate accepted");
                return Ok(());
            }
            event.particles.truncate(base);

            if self.max_attempts.is_some_and(|max| tries >= max) {
                return Err(GeneratorError::WindowUnreachable { attempts: tries });
            }
        }
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// `accepted / attempts`, or `None` before the first acceptance.
    pub fn weight(&self) -> Option<f64> {
        if self.accepted == 0 {
            return None;
        }
        Some(self.accepted as f64 / self.attempts as f64)
    }
}
