//! Shared fixtures for generator integration tests.

use nucdecay_core::event::Event;
use nucdecay_core::random::RandUniform;
use nucdecay_core::types::DecayConfig;
use nucdecay_gen::DecayGenerator;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seed used by the example driver program.
pub const DEFAULT_SEED: u64 = 314159;

/// Seeded uniform source over the standard engine.
pub fn seeded(seed: u64) -> RandUniform<StdRng> {
    RandUniform::new(StdRng::seed_from_u64(seed))
}

/// Initialized generator for `config`.
///
/// Panics if the configuration does not resolve.
pub fn initialized(config: DecayConfig) -> DecayGenerator {
    let mut generator = DecayGenerator::with_config(config);
    generator.initialize().expect("configuration should resolve");
    generator
}

/// Shoot `n` events into fresh buffers.
pub fn shoot_n(generator: &mut DecayGenerator, seed: u64, n: usize) -> Vec<Event> {
    let mut prng = seeded(seed);
    (0..n)
        .map(|_| {
            let mut event = Event::new();
            generator.shoot(&mut prng, &mut event).expect("initialized generator");
            event
        })
        .collect()
}

/// Kinetic energy sum of every event.
pub fn energy_sums(events: &[Event]) -> Vec<f64> {
    events.iter().map(Event::total_kinetic_energy).collect()
}

/// Sample mean.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
