//! Generated particle record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{ALPHA_MASS, ELECTRON_MASS, NEUTRON_MASS, PROTON_MASS};

/// Particle species, numbered with the GEANT3 convention used by decay files.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleCode {
    Gamma,
    Positron,
    Electron,
    Neutrino,
    Neutron,
    Proton,
    Alpha,
}

impl ParticleCode {
    /// Numeric GEANT3 code written in event files.
    pub fn code(&self) -> u32 {
        match self {
            Self::Gamma => 1,
            Self::Positron => 2,
            Self::Electron => 3,
            Self::Neutrino => 4,
            Self::Neutron => 13,
            Self::Proton => 14,
            Self::Alpha => 47,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Gamma),
            2 => Some(Self::Positron),
            3 => Some(Self::Electron),
            4 => Some(Self::Neutrino),
            13 => Some(Self::Neutron),
            14 => Some(Self::Proton),
            47 => Some(Self::Alpha),
            _ => None,
        }
    }

    /// Rest mass in MeV/c².
    pub fn mass(&self) -> f64 {
        match self {
            Self::Gamma | Self::Neutrino => 0.0,
            Self::Positron | Self::Electron => ELECTRON_MASS,
            Self::Neutron => NEUTRON_MASS,
            Self::Proton => PROTON_MASS,
            Self::Alpha => ALPHA_MASS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gamma => "gamma",
            Self::Positron => "e+",
            Self::Electron => "e-",
            Self::Neutrino => "nu",
            Self::Neutron => "neutron",
            Self::Proton => "proton",
            Self::Alpha => "alpha",
        }
    }
}

impl fmt::Display for ParticleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One emitted particle.
///
/// `time` is the emission offset in seconds relative to the start of the
/// decay event; `momentum` is in MeV/c.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Particle {
    pub code: ParticleCode,
    pub time: f64,
    pub momentum: [f64; 3],
    /// Optional human-readable label, e.g. "e-".
    pub name: Option<String>,
}

impl Particle {
    /// Create a named particle with the given emission time and momentum.
    pub fn new(code: ParticleCode, time: f64, momentum: [f64; 3]) -> Self {
        Self {
            code,
            time,
            momentum,
            name: Some(code.name().to_string()),
        }
    }

    /// Create a particle of the given kinetic energy (MeV) along a unit direction.
    pub fn with_kinetic_energy(
        code: ParticleCode,
        time: f64,
        kinetic: f64,
        direction: [f64; 3],
    ) -> Self {
        let p = momentum_from_kinetic(kinetic, code.mass());
        Self::new(
            code,
            time,
            [p * direction[0], p * direction[1], p * direction[2]],
        )
    }

    pub fn momentum_magnitude(&self) -> f64 {
        let [px, py, pz] = self.momentum;
        (px * px + py * py + pz * pz).sqrt()
    }

    /// Total energy `sqrt(p² + m²)` in MeV.
    pub fn total_energy(&self) -> f64 {
        let m = self.code.mass();
        let p = self.momentum_magnitude();
        (p * p + m * m).sqrt()
    }

    /// Kinetic energy `E - m` in MeV.
    pub fn kinetic_energy(&self) -> f64 {
        let m = self.code.mass();
        let p = self.momentum_magnitude();
        if m == 0.0 {
            return p;
        }
        // p² / (E + m) avoids cancellation for slow heavy particles.
        p * p / ((p * p + m * m).sqrt() + m)
    }

    pub fn is_gamma(&self) -> bool {
        self.code == ParticleCode::Gamma
    }

    pub fn is_electron(&self) -> bool {
        self.code == ParticleCode::Electron
    }
}

/// Momentum magnitude (MeV/c) of a particle with kinetic energy `t` and mass `m`.
pub fn momentum_from_kinetic(t: f64, m: f64) -> f64 {
    (t * (t + 2.0 * m)).sqrt()
}
