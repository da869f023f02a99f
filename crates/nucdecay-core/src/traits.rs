//! Trait interfaces between the generator and its physics back ends.
//!
//! - [`SpectrumSampler`] — produces one decay's particles for a fixed
//!   (category, isotope, mode, level) choice (nucdecay-gen implements).

use std::fmt::Debug;

use crate::event::Event;
use crate::random::UniformRandom;

/// Per-decay-mode sampling strategy.
///
/// A sampler is resolved once when the generator initializes and then
/// invoked for every candidate event. It appends the emitted particles to
/// `event` in emission order; it never clears the event, never sets the
/// event-level time, and never fails. Energies and momenta it produces must
/// respect the kinematic limits of the modelled transition.
pub trait SpectrumSampler: Debug + Send {
    /// Append one sampled decay to `event`.
    fn shoot(&mut self, prng: &mut dyn UniformRandom, event: &mut Event);

    /// Short human-readable summary of the modelled process.
    fn description(&self) -> String;

    /// Largest possible kinetic energy sum of one event (MeV), if known.
    ///
    /// Used to reject energy windows that lie entirely above the spectrum.
    /// Default implementation: unknown.
    fn max_energy_sum(&self) -> Option<f64> {
        None
    }

    /// Smallest possible kinetic energy sum of one event (MeV), if known.
    ///
    /// Used to reject energy windows that lie entirely below the spectrum.
    fn min_energy_sum(&self) -> Option<f64> {
        None
    }
}
