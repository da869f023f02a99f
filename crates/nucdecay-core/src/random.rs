//! Uniform random source abstraction.
//!
//! The physics layer only ever asks for one thing: a real number drawn
//! (quasi-)uniformly from `[0, 1)`. [`UniformRandom`] captures that contract
//! so samplers stay independent of any particular engine. Quality and seeding
//! of the underlying engine are the caller's responsibility.

use rand::RngCore;
use rand::distributions::{Distribution, Standard};

/// A source of uniform deviates in `[0, 1)`.
///
/// Callable an unbounded number of times; implementations never reset
/// hidden state on their own.
pub trait UniformRandom {
    /// Next uniform deviate in `[0, 1)`.
    fn uniform(&mut self) -> f64;
}

impl<F> UniformRandom for F
where
    F: FnMut() -> f64,
{
    fn uniform(&mut self) -> f64 {
        self()
    }
}

/// Adapts any [`rand::RngCore`] engine to [`UniformRandom`].
///
/// Works with owned engines and with `&mut R`, since `&mut R: RngCore`.
///
/// # Examples
///
/// ```
/// use nucdecay_core::random::{RandUniform, UniformRandom};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut prng = RandUniform::new(StdRng::seed_from_u64(314159));
/// let x = prng.uniform();
/// assert!((0.0..1.0).contains(&x));
/// ```
#[derive(Debug, Clone)]
pub struct RandUniform<R> {
    rng: R,
}

impl<R: RngCore> RandUniform<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Borrow the wrapped engine, e.g. to draw event times from the same stream
    /// with a `rand_distr` distribution.
    pub fn engine_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: RngCore> UniformRandom for RandUniform<R> {
    fn uniform(&mut self) -> f64 {
        Standard.sample(&mut self.rng)
    }
}

/// Draw an exponentially distributed delay for a nuclear level with the given
/// half-life, through the sampler-facing uniform source.
///
/// Returns 0 for a zero or negative half-life (prompt emission).
pub fn exponential_delay(prng: &mut dyn UniformRandom, half_life: f64) -> f64 {
    if half_life <= 0.0 {
        return 0.0;
    }
    // 1 - u lies in (0, 1], so the logarithm stays finite.
    -(1.0 - prng.uniform()).ln() * half_life / std::f64::consts::LN_2
}
