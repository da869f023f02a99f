//! Coulomb correction (Fermi function) for beta spectra.
//!
//! Relativistic point-charge Fermi function with a finite nuclear radius:
//!
//! ```text
//! F(Z, W) = 2(1 + γ) (2pR)^(2γ - 2) e^(πy) |Γ(γ + iy)|² / Γ(2γ + 1)²
//! γ = sqrt(1 - (αZ)²),  y = αZ W / p
//! ```
//!
//! with `W` the total electron energy and `p` the momentum in units of mₑ,
//! and `R` the nuclear radius in units of ħ/mₑc. `Z` is the charge of the
//! daughter nucleus, taken negative for positron emission. Everything is
//! evaluated in log space: `e^(πy)` and `|Γ(γ + iy)|²` overflow and underflow
//! separately near the spectrum endpoint at zero kinetic energy.

use nucdecay_core::constants::{
    ELECTRON_COMPTON_FM, ELECTRON_MASS, FINE_STRUCTURE, MIN_KINETIC_ENERGY, NUCLEAR_RADIUS_FM,
};

/// Lanczos approximation coefficients, g = 7, n = 9.
const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Real part of `ln Γ(x + iy)`, i.e. `ln |Γ(x + iy)|`.
///
/// Arguments with `x < 0.5` are shifted upward with `Γ(z) = Γ(z + 1) / z`.
pub fn ln_gamma_abs(x: f64, y: f64) -> f64 {
    if x < 0.5 {
        return ln_gamma_abs(x + 1.0, y) - x.hypot(y).ln();
    }

    // Lanczos series A(z) for z - 1 = (x - 1) + iy.
    let mut a_re = LANCZOS[0];
    let mut a_im = 0.0;
    for (k, &c) in LANCZOS.iter().enumerate().skip(1) {
        let d_re = x - 1.0 + k as f64;
        let denom = d_re * d_re + y * y;
        a_re += c * d_re / denom;
        a_im -= c * y / denom;
    }

    // t = z - 1 + g + 1/2
    let t_re = x - 0.5 + LANCZOS_G;
    let t_abs_ln = t_re.hypot(y).ln();
    let t_arg = y.atan2(t_re);

    // Re[(z - 1/2) ln t] = (x - 1/2) ln|t| - y arg t
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x - 0.5) * t_abs_ln - y * t_arg - t_re
        + a_re.hypot(a_im).ln()
}

/// Nuclear radius in natural units (ħ/mₑc) for mass number `a`.
pub fn nuclear_radius(a: u32) -> f64 {
    NUCLEAR_RADIUS_FM * f64::from(a).cbrt() / ELECTRON_COMPTON_FM
}

/// Fermi function for a daughter of charge `z` (negative for β+),
/// mass number `a`, and electron kinetic energy `kinetic` (MeV).
///
/// Returns 1 for `z == 0`.
pub fn fermi(z: i32, a: u32, kinetic: f64) -> f64 {
    if z == 0 {
        return 1.0;
    }
    let t = kinetic.max(MIN_KINETIC_ENERGY);
    let w = t / ELECTRON_MASS + 1.0;
    let p = (w * w - 1.0).sqrt();

    let alpha_z = FINE_STRUCTURE * f64::from(z);
    let gamma = (1.0 - alpha_z * alpha_z).sqrt();
    let y = alpha_z * w / p;
    let r = nuclear_radius(a);

    let ln_f = (2.0 * (1.0 + gamma)).ln()
        + (2.0 * gamma - 2.0) * (2.0 * p * r).ln()
        + std::f64::consts::PI * y
        + 2.0 * ln_gamma_abs(gamma, y)
        - 2.0 * ln_gamma_abs(2.0 * gamma + 1.0, 0.0);
    ln_f.exp()
}

/// Allowed beta spectral factor `F(Z, T) · p · E` with `p`, `E` in MeV.
///
/// Shared by single and double beta spectrum shapes.
pub fn electron_phase_space(z: i32, a: u32, kinetic: f64) -> f64 {
    let t = kinetic.max(MIN_KINETIC_ENERGY);
    let e = t + ELECTRON_MASS;
    let p = (t * (t + 2.0 * ELECTRON_MASS)).sqrt();
    fermi(z, a, kinetic) * p * e
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ln_gamma_real_values() {
        // Γ(1) = Γ(2) = 1, Γ(5) = 24, Γ(0.5) = √π
        assert!(ln_gamma_abs(1.0, 0.0).abs() < 1e-12);
        assert!(ln_gamma_abs(2.0, 0.0).abs() < 1e-12);
        assert!((ln_gamma_abs(5.0, 0.0) - 24f64.ln()).abs() < 1e-12);
        assert!((ln_gamma_abs(0.5, 0.0) - std::f64::consts::PI.sqrt().ln()).abs() < 1e-12);
    }

    #[test]
    fn ln_gamma_shift_below_half() {
        // Γ(0.25) = 3.6256099082219083
        assert!((ln_gamma_abs(0.25, 0.0) - 3.625_609_908_221_908_3f64.ln()).abs() < 1e-10);
    }

    #[test]
    fn ln_gamma_imaginary_axis() {
        // |Γ(1 + iy)|² = πy / sinh(πy)
        for y in [0.1, 1.0, 3.0, 10.0] {
            let py = std::f64::consts::PI * y;
            let expected = 0.5 * (py / py.sinh()).ln();
            assert!(
                (ln_gamma_abs(1.0, y) - expected).abs() < 1e-10,
                "mismatch at y = {y}"
            );
        }
    }

    #[test]
    fn fermi_neutral_is_one() {
        assert_eq!(fermi(0, 100, 1.0), 1.0);
    }

    #[test]
    fn fermi_enhances_electrons() {
        for t in [0.01, 0.1, 1.0, 3.0] {
            assert!(fermi(44, 100, t) > 1.0, "F(44, {t}) should exceed 1");
        }
    }

    #[test]
    fn fermi_suppresses_positrons() {
        for t in [0.01, 0.1, 1.0] {
            assert!(fermi(-10, 22, t) < 1.0, "F(-10, {t}) should be below 1");
        }
    }

    #[test]
    fn fermi_decreases_with_energy_for_electrons() {
        let low = fermi(56, 137, 0.05);
        let high = fermi(56, 137, 2.0);
        assert!(low > high);
    }

    #[test]
    fn fermi_close_to_nonrelativistic_limit_for_light_nuclei() {
        // For small αZ the function approaches 2πη / (1 - e^(-2πη)).
        let z = 2;
        let t = 0.01;
        let w = t / ELECTRON_MASS + 1.0;
        let p = (w * w - 1.0).sqrt();
        let eta = FINE_STRUCTURE * f64::from(z) * w / p;
        let x = 2.0 * std::f64::consts::PI * eta;
        let approx = x / (1.0 - (-x).exp());
        let exact = fermi(z, 3, t);
        assert!((exact / approx - 1.0).abs() < 0.05, "exact {exact}, approx {approx}");
    }

    #[test]
    fn phase_space_finite_at_endpoint() {
        let f0 = electron_phase_space(44, 100, 0.0);
        assert!(f0.is_finite() && f0 > 0.0);
        // Coulomb attraction keeps p·F finite and non-zero as p → 0.
        let f1 = electron_phase_space(44, 100, 1e-4);
        assert!(f1.is_finite() && f1 > 0.0);
    }

    #[test]
    fn phase_space_small_at_endpoint_without_charge() {
        let w = electron_phase_space(0, 1, 0.0);
        assert!(w > 0.0 && w < 1e-3, "{w}");
    }

    proptest! {
        #[test]
        fn fermi_positive_and_finite(z in 0i32..90, a in 1u32..250, t in 0.0f64..5.0) {
            let f = fermi(z, a, t);
            prop_assert!(f.is_finite() && f > 0.0, "F({}, {}, {}) = {}", z, a, t, f);
        }

        #[test]
        fn fermi_positron_bounded(z in -60i32..0, a in 1u32..250, t in 0.0f64..5.0) {
            // Repulsion drives F towards zero near the endpoint; it may underflow.
            let f = fermi(z, a, t);
            prop_assert!(f.is_finite() && (0.0..1.0).contains(&f), "F({z}, {a}, {t}) = {f}");
        }

        #[test]
        fn phase_space_non_negative(z in 0i32..90, t in 0.0f64..5.0) {
            let w = electron_phase_space(z, 100, t);
            prop_assert!(w.is_finite() && w >= 0.0);
        }
    }
}
