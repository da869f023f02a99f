//! Direction sampling and angular correlations.
//!
//! Directions are unit [`Vector3`]s. Correlated emissions are built by
//! rotating a reference direction by a polar angle (given as `cos θ`) and a
//! uniform azimuth. Callers convert to `[f64; 3]` when filling a particle.

use std::f64::consts::PI;

use nalgebra::Vector3;

use nucdecay_core::random::UniformRandom;

/// Isotropic unit vector.
pub fn isotropic_direction(prng: &mut dyn UniformRandom) -> Vector3<f64> {
    let cos_theta = 2.0 * prng.uniform() - 1.0;
    let phi = 2.0 * PI * prng.uniform();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Rotate unit vector `u` to a new direction at polar cosine `mu` and azimuth `phi`.
pub fn rotate_direction(u: &Vector3<f64>, mu: f64, phi: f64) -> Vector3<f64> {
    let sin_theta = (1.0 - mu * mu).max(0.0).sqrt();

    // Any unit vector perpendicular to u.
    let perp = if u.x.abs() < 0.99 {
        Vector3::x().cross(u).normalize()
    } else {
        Vector3::y().cross(u).normalize()
    };
    let ortho = u.cross(&perp);

    let (s, c) = phi.sin_cos();
    mu * u + sin_theta * c * perp + sin_theta * s * ortho
}

/// Direction at polar cosine `mu` from `u`, with a uniformly sampled azimuth.
pub fn correlated_direction(
    prng: &mut dyn UniformRandom,
    u: &Vector3<f64>,
    mu: f64,
) -> Vector3<f64> {
    let phi = 2.0 * PI * prng.uniform();
    rotate_direction(u, mu, phi)
}

/// Sample `cos θ` from the density `1 + a·cos θ` on `[-1, 1]`, `|a| ≤ 1`.
///
/// Used for the electron-electron correlation `1 + k·β₁β₂·cos θ`.
pub fn sample_linear_cosine(prng: &mut dyn UniformRandom, a: f64) -> f64 {
    let a = a.clamp(-1.0, 1.0);
    let envelope = 1.0 + a.abs();
    loop {
        let c = 2.0 * prng.uniform() - 1.0;
        if prng.uniform() * envelope <= 1.0 + a * c {
            return c;
        }
    }
}

/// Sample `cos θ` for a 0⁺ → 2⁺ → 0⁺ gamma-gamma cascade:
/// `W(θ) = 1 - 3cos²θ + 4cos⁴θ`, whose maximum on `[-1, 1]` is 2.
pub fn sample_zero_two_zero_cosine(prng: &mut dyn UniformRandom) -> f64 {
    loop {
        let c = 2.0 * prng.uniform() - 1.0;
        let c2 = c * c;
        let w = 1.0 - 3.0 * c2 + 4.0 * c2 * c2;
        if 2.0 * prng.uniform() <= w {
            return c;
        }
    }
}
