//! Allowed single beta spectrum.
//!
//! `N(T) ∝ F(Z, T) · p · E · (Q - T)²`, sampled by rejection under a
//! constant envelope found by scanning the spectrum at construction.

use nucdecay_core::constants::{ENVELOPE_MARGIN, ENVELOPE_SCAN_POINTS};
use nucdecay_core::random::UniformRandom;

use crate::fermi::electron_phase_space;

#[derive(Debug, Clone, PartialEq)]
pub struct BetaSpectrum {
    /// Daughter charge, negative for positron emission.
    z: i32,
    a: u32,
    q: f64,
    envelope: f64,
}

impl BetaSpectrum {
    /// Electron spectrum for a daughter of charge `z_daughter`.
    pub fn electron(z_daughter: i32, a: u32, q: f64) -> Self {
        Self::with_charge(z_daughter, a, q)
    }

    /// Positron spectrum; the Coulomb field repels the positron.
    pub fn positron(z_daughter: i32, a: u32, q: f64) -> Self {
        Self::with_charge(-z_daughter, a, q)
    }

    fn with_charge(z: i32, a: u32, q: f64) -> Self {
        let mut spectrum = Self { z, a, q, envelope: 0.0 };
        let step = q / ENVELOPE_SCAN_POINTS as f64;
        let max = (0..=ENVELOPE_SCAN_POINTS)
            .map(|i| spectrum.density(i as f64 * step))
            .fold(0.0, f64::max);
        spectrum.envelope = max * ENVELOPE_MARGIN;
        spectrum
    }

    /// Endpoint (maximum kinetic energy) in MeV.
    pub fn endpoint(&self) -> f64 {
        self.q
    }

    pub fn envelope(&self) -> f64 {
        self.envelope
    }

    /// Unnormalised spectral density at kinetic energy `t`.
    pub fn density(&self, t: f64) -> f64 {
        if !(0.0..=self.q).contains(&t) {
            return 0.0;
        }
        let rest = self.q - t;
        electron_phase_space(self.z, self.a, t) * rest * rest
    }

    /// Draw a kinetic energy in `(0, Q]`.
    pub fn sample(&self, prng: &mut dyn UniformRandom) -> f64 {
        loop {
            let t = self.q * (1.0 - prng.uniform());
            if prng.uniform() * self.envelope <= self.density(t) {
                return t;
            }
        }
    }
}
