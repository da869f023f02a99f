//! Physical constants. Energies in MeV, momenta in MeV/c, times in seconds.

/// Electron rest mass (MeV/c²).
pub const ELECTRON_MASS: f64 = 0.510_998_95;

/// Alpha particle rest mass (MeV/c²).
pub const ALPHA_MASS: f64 = 3727.379_4;

/// Proton rest mass (MeV/c²).
pub const PROTON_MASS: f64 = 938.272_088;

/// Neutron rest mass (MeV/c²).
pub const NEUTRON_MASS: f64 = 939.565_42;

/// Fine-structure constant.
pub const FINE_STRUCTURE: f64 = 1.0 / 137.035_999;

/// Reduced Compton wavelength of the electron in femtometres.
///
/// Converts a nuclear radius in fm into natural units (ħ/mₑc).
pub const ELECTRON_COMPTON_FM: f64 = 386.159_268;

/// Nuclear radius parameter `r0` in `R = r0 · A^(1/3)` (fm).
pub const NUCLEAR_RADIUS_FM: f64 = 1.2;

/// Smallest kinetic energy used when evaluating spectral weights.
///
/// Below this the Coulomb correction is evaluated at the cutoff to keep
/// the log-space computation finite.
pub const MIN_KINETIC_ENERGY: f64 = 1e-6;

/// Number of grid points per axis when scanning a spectrum for its maximum.
pub const ENVELOPE_SCAN_POINTS: usize = 200;

/// Safety factor applied to scanned spectrum maxima before rejection sampling.
///
/// A grid scan can miss the true maximum by a small amount; the margin keeps
/// the envelope above the density everywhere.
pub const ENVELOPE_MARGIN: f64 = 1.05;

/// Label attached to events produced by `DecayGenerator`.
pub const GENERATOR_LABEL: &str = "nucdecay";
