//! Double beta decay spectrum sampler.
//!
//! The two electron kinetic energies `(t1, t2)` are drawn by rejection from
//!
//! ```text
//! w(t1, t2) = f(t1) · f(t2) · S(t1, t2),   f(t) = F(Z, t) · p · E
//! ```
//!
//! where `S` is `(E0 - t1 - t2)^n` for modes with unobserved light particles
//! (n = 5 for 2νββ, 1/3/7 for Majoron emission, 7 for 2νββ to a 2+ level).
//! In 0νββ modes the electrons carry the full transition energy `E0`, so only
//! `t1` is sampled and `S` is 1 (mass mechanism) or `(t1 - t2)²` (right-handed
//! current). The opening angle follows `1 + k·β1·β2·cos θ`.
//!
//! The envelope maximum is found by a grid scan when the sampler is built and
//! widened by [`ENVELOPE_MARGIN`].

use nucdecay_core::constants::{ELECTRON_MASS, ENVELOPE_MARGIN, ENVELOPE_SCAN_POINTS};
use nucdecay_core::event::Event;
use nucdecay_core::particle::{Particle, ParticleCode, momentum_from_kinetic};
use nucdecay_core::random::UniformRandom;
use nucdecay_core::traits::SpectrumSampler;
use nucdecay_core::types::DbdMode;

use crate::fermi::electron_phase_space;
use crate::kinematics::{
    correlated_direction, isotropic_direction, sample_linear_cosine, sample_zero_two_zero_cosine,
};
use crate::nuclides::{DaughterLevel, DbdNuclide, SpinParity};

/// Power of the energy left to unobserved particles, `None` for 0νββ.
pub fn sum_exponent(mode: DbdMode) -> Option<i32> {
    match mode {
        DbdMode::NeutrinolessMass | DbdMode::NeutrinolessRightHanded => None,
        DbdMode::MajoronN1 => Some(1),
        DbdMode::MajoronN3 => Some(3),
        DbdMode::TwoNeutrino => Some(5),
        DbdMode::MajoronN7 | DbdMode::TwoNeutrinoToTwoPlus => Some(7),
    }
}

/// Coefficient `k` of the electron angular correlation `1 + k·β1·β2·cos θ`.
pub fn angular_coefficient(mode: DbdMode) -> f64 {
    match mode {
        DbdMode::NeutrinolessRightHanded => 1.0,
        DbdMode::TwoNeutrinoToTwoPlus => 1.0 / 3.0,
        _ => -1.0,
    }
}

/// Whether `mode` can populate a daughter level of the given spin-parity.
pub fn accepts_level(mode: DbdMode, spin: SpinParity) -> bool {
    match mode {
        DbdMode::TwoNeutrinoToTwoPlus => spin == SpinParity::TwoPlus,
        _ => spin == SpinParity::ZeroPlus,
    }
}

#[derive(Debug, Clone)]
pub struct DoubleBetaSampler {
    nuclide: &'static DbdNuclide,
    level_index: u32,
    level: &'static DaughterLevel,
    mode: DbdMode,
    /// Energy shared by the electrons and any unobserved particles (MeV).
    e0: f64,
    envelope: f64,
}

impl DoubleBetaSampler {
    /// Build the sampler and scan its spectrum for the envelope maximum.
    ///
    /// The caller guarantees `level_index` exists and is accepted by `mode`.
    pub fn new(nuclide: &'static DbdNuclide, level_index: u32, mode: DbdMode) -> Option<Self> {
        let level = nuclide.level(level_index)?;
        let mut sampler = Self {
            nuclide,
            level_index,
            level,
            mode,
            e0: nuclide.transition_energy(level),
            envelope: 0.0,
        };
        sampler.envelope = sampler.scan_maximum() * ENVELOPE_MARGIN;
        Some(sampler)
    }

    pub fn transition_energy(&self) -> f64 {
        self.e0
    }

    pub fn envelope(&self) -> f64 {
        self.envelope
    }

    fn phase_space(&self, t: f64) -> f64 {
        electron_phase_space(self.nuclide.z_daughter, self.nuclide.a, t)
    }

    /// Unnormalised spectral density at `(t1, t2)`.
    pub fn density(&self, t1: f64, t2: f64) -> f64 {
        let shape = match sum_exponent(self.mode) {
            Some(n) => {
                let rest = self.e0 - t1 - t2;
                if rest < 0.0 {
                    return 0.0;
                }
                rest.powi(n)
            }
            None if self.mode == DbdMode::NeutrinolessRightHanded => (t1 - t2).powi(2),
            None => 1.0,
        };
        self.phase_space(t1) * self.phase_space(t2) * shape
    }

    fn scan_maximum(&self) -> f64 {
        let n = ENVELOPE_SCAN_POINTS;
        let step = self.e0 / n as f64;
        let mut max = 0.0f64;
        match sum_exponent(self.mode) {
            Some(exponent) => {
                let f: Vec<f64> = (0..=n).map(|i| self.phase_space(i as f64 * step)).collect();
                for i in 0..=n {
                    for j in 0..=(n - i) {
                        let rest = (self.e0 - (i + j) as f64 * step).max(0.0);
                        max = max.max(f[i] * f[j] * rest.powi(exponent));
                    }
                }
            }
            None => {
                for i in 0..=n {
                    let t1 = i as f64 * step;
                    max = max.max(self.density(t1, self.e0 - t1));
                }
            }
        }
        max
    }

    fn sample_energies(&self, prng: &mut dyn UniformRandom) -> (f64, f64) {
        if sum_exponent(self.mode).is_none() {
            loop {
                let t1 = self.e0 * prng.uniform();
                let t2 = self.e0 - t1;
                if prng.uniform() * self.envelope <= self.density(t1, t2) {
                    return (t1, t2);
                }
            }
        }
        loop {
            let t1 = self.e0 * prng.uniform();
            let t2 = self.e0 * prng.uniform();
            if t1 + t2 > self.e0 {
                continue;
            }
            if prng.uniform() * self.envelope <= self.density(t1, t2) {
                return (t1, t2);
            }
        }
    }

    fn emit_cascade(&self, prng: &mut dyn UniformRandom, event: &mut Event) {
        let cascade = self.level.cascade;
        if cascade.len() == 2 && self.level.spin == SpinParity::ZeroPlus {
            let d1 = isotropic_direction(prng);
            let cos = sample_zero_two_zero_cosine(prng);
            let d2 = correlated_direction(prng, &d1, cos);
            for (energy, d) in [(cascade[0], d1), (cascade[1], d2)] {
                event.add_particle(Particle::with_kinetic_energy(
                    ParticleCode::Gamma,
                    0.0,
                    energy,
                    d.into(),
                ));
            }
            return;
        }
        for &energy in cascade {
            let d = isotropic_direction(prng);
            event.add_particle(Particle::with_kinetic_energy(
                ParticleCode::Gamma,
                0.0,
                energy,
                d.into(),
            ));
        }
    }
}

fn beta(t: f64) -> f64 {
    momentum_from_kinetic(t, ELECTRON_MASS) / (t + ELECTRON_MASS)
}

impl SpectrumSampler for DoubleBetaSampler {
    fn shoot(&mut self, prng: &mut dyn UniformRandom, event: &mut Event) {
        let (t1, t2) = self.sample_energies(prng);

        let k = angular_coefficient(self.mode) * beta(t1) * beta(t2);
        let cos = sample_linear_cosine(prng, k);
        let d1 = isotropic_direction(prng);
        let d2 = correlated_direction(prng, &d1, cos);

        for (t, d) in [(t1, d1), (t2, d2)] {
            event.add_particle(Particle::with_kinetic_energy(
                ParticleCode::Electron,
                0.0,
                t,
                d.into(),
            ));
        }
        self.emit_cascade(prng, event);
    }

    fn description(&self) -> String {
        format!(
            "{} double beta, mode {} ({}), level {} ({:.1} keV), E0 = {} MeV",
            self.nuclide.name,
            self.mode,
            self.mode.description(),
            self.level_index,
            self.level.energy * 1e3,
            self.e0
        )
    }

    fn max_energy_sum(&self) -> Option<f64> {
        Some(self.nuclide.q_value)
    }

    fn min_energy_sum(&self) -> Option<f64> {
        match sum_exponent(self.mode) {
            Some(_) => Some(self.level.cascade.iter().sum()),
            None => Some(self.nuclide.q_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use crate::nuclides::find;
    use nucdecay_core::random::RandUniform;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prng(seed: u64) -> RandUniform<StdRng> {
        RandUniform::new(StdRng::seed_from_u64(seed))
    }

    fn sampler(name: &str, level: u32, mode: DbdMode) -> DoubleBetaSampler {
        DoubleBetaSampler::new(find(name).unwrap(), level, mode).unwrap()
    }

    #[test]
    fn mode_level_compatibility() {
        assert!(accepts_level(DbdMode::TwoNeutrino, SpinParity::ZeroPlus));
        assert!(!accepts_level(DbdMode::TwoNeutrino, SpinParity::TwoPlus));
        assert!(accepts_level(DbdMode::TwoNeutrinoToTwoPlus, SpinParity::TwoPlus));
        assert!(!accepts_level(DbdMode::NeutrinolessMass, SpinParity::TwoPlus));
    }

    #[test]
    fn unknown_level_yields_none() {
        assert!(DoubleBetaSampler::new(find("Ca48").unwrap(), 1, DbdMode::TwoNeutrino).is_none());
    }

    #[test]
    fn envelope_dominates_density() {
        let s = sampler("Mo100", 0, DbdMode::TwoNeutrino);
        let n = 97;
        let step = s.transition_energy() / n as f64;
        for i in 0..=n {
            for j in 0..=(n - i) {
                let w = s.density(i as f64 * step, j as f64 * step);
                assert!(w <= s.envelope(), "density {w} above envelope {}", s.envelope());
            }
        }
    }

    #[test]
    fn two_neutrino_ground_state_event() {
        let mut s = sampler("Mo100", 0, DbdMode::TwoNeutrino);
        let mut r = prng(314159);
        let mut e = Event::new();
        for _ in 0..200 {
            e.reset();
            s.shoot(&mut r, &mut e);
            assert_eq!(e.len(), 2);
            assert!(e.particles.iter().all(|p| p.is_electron()));
            let sum = e.total_kinetic_energy();
            assert!(sum > 0.0 && sum <= 3.0344 + 1e-9, "sum {sum}");
        }
    }

    #[test]
    fn neutrinoless_electrons_share_q_value() {
        for mode in [DbdMode::NeutrinolessMass, DbdMode::NeutrinolessRightHanded] {
            let mut s = sampler("Xe136", 0, mode);
            let mut r = prng(2);
            let mut e = Event::new();
            for _ in 0..100 {
                e.reset();
                s.shoot(&mut r, &mut e);
                assert!((e.total_kinetic_energy() - 2.4578).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn excited_zero_plus_level_emits_correlated_gammas() {
        let mut s = sampler("Mo100", 2, DbdMode::TwoNeutrino);
        let mut r = prng(3);
        let mut e = Event::new();
        s.shoot(&mut r, &mut e);
        assert_eq!(e.len(), 4);
        assert!(e.particles[2].is_gamma() && e.particles[3].is_gamma());
        assert!((e.particles[2].kinetic_energy() - 0.590760).abs() < 1e-12);
        assert!((e.particles[3].kinetic_energy() - 0.539510).abs() < 1e-12);
        let electrons = e.kinetic_energy_of(ParticleCode::Electron);
        assert!(electrons <= 3.0344 - 1.130270 + 1e-9);
    }

    #[test]
    fn two_plus_level_emits_single_gamma() {
        let mut s = sampler("Nd150", 1, DbdMode::TwoNeutrinoToTwoPlus);
        let mut r = prng(4);
        let mut e = Event::new();
        s.shoot(&mut r, &mut e);
        assert_eq!(e.len(), 3);
        assert!((e.particles[2].kinetic_energy() - 0.333970).abs() < 1e-12);
        assert_eq!(s.max_energy_sum(), Some(3.3714));
    }

    #[test]
    fn energy_sum_bounds_follow_mode_and_level() {
        let ground = sampler("Mo100", 0, DbdMode::TwoNeutrino);
        assert_eq!(ground.min_energy_sum(), Some(0.0));

        let excited = sampler("Mo100", 2, DbdMode::TwoNeutrino);
        let min = excited.min_energy_sum().unwrap();
        assert!((min - 1.130270).abs() < 1e-9, "{min}");

        let neutrinoless = sampler("Xe136", 0, DbdMode::NeutrinolessMass);
        assert_eq!(neutrinoless.min_energy_sum(), neutrinoless.max_energy_sum());
    }

    #[test]
    fn excited_level_sums_never_below_minimum() {
        let mut s = sampler("Mo100", 2, DbdMode::TwoNeutrino);
        let min = s.min_energy_sum().unwrap();
        let mut r = prng(12);
        let mut e = Event::new();
        for _ in 0..300 {
            e.reset();
            s.shoot(&mut r, &mut e);
            assert!(e.total_kinetic_energy() >= min - 1e-9);
        }
    }

    #[test]
    fn two_neutrino_electrons_prefer_back_to_back() {
        // k = -β1β2 < 0 makes the mean opening cosine negative.
        let mut s = sampler("Ca48", 0, DbdMode::TwoNeutrino);
        let mut r = prng(5);
        let mut e = Event::new();
        let n = 5_000;
        let mut mean = 0.0;
        for _ in 0..n {
            e.reset();
            s.shoot(&mut r, &mut e);
            let a = Vector3::from(e.particles[0].momentum);
            let b = Vector3::from(e.particles[1].momentum);
            mean += a.normalize().dot(&b.normalize());
        }
        mean /= n as f64;
        assert!(mean < -0.05, "mean opening cosine {mean}");
    }

    #[test]
    fn majoron_index_softens_sum_spectrum() {
        // Higher spectral index pushes the electron sum towards lower energies.
        let mut r = prng(6);
        let mut mean_sum = |mode| {
            let mut s = sampler("Mo100", 0, mode);
            let mut e = Event::new();
            let n = 2_000;
            let mut total = 0.0;
            for _ in 0..n {
                e.reset();
                s.shoot(&mut r, &mut e);
                total += e.total_kinetic_energy();
            }
            total / n as f64
        };
        let m1 = mean_sum(DbdMode::MajoronN1);
        let m3 = mean_sum(DbdMode::MajoronN3);
        let m7 = mean_sum(DbdMode::MajoronN7);
        assert!(m1 > m3 && m3 > m7, "means {m1} {m3} {m7}");
    }

    #[test]
    fn description_mentions_isotope_and_mode() {
        let s = sampler("Mo100", 0, DbdMode::TwoNeutrino);
        let d = s.description();
        assert!(d.contains("Mo100"));
        assert!(d.contains("mode 4"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn momenta_finite_and_energy_bounded(seed in any::<u64>(), mode_idx in 0usize..5) {
            let mode = [
                DbdMode::NeutrinolessMass,
                DbdMode::NeutrinolessRightHanded,
                DbdMode::TwoNeutrino,
                DbdMode::MajoronN1,
                DbdMode::MajoronN3,
            ][mode_idx];
            let mut s = sampler("Se82", 0, mode);
            let mut r = prng(seed);
            let mut e = Event::new();
            s.shoot(&mut r, &mut e);
            prop_assert_eq!(e.len(), 2);
            for p in &e.particles {
                prop_assert!(p.momentum.iter().all(|c| c.is_finite()));
            }
            prop_assert!(e.total_kinetic_energy() <= 2.9979 + 1e-9);
        }
    }
}
