//! Double beta decay nuclide table.
//!
//! Q values are atomic mass differences in MeV. Each daughter level lists the
//! de-excitation gammas in emission order; the ground state has none.

use serde::Serialize;

/// Spin-parity of a daughter level, as far as mode selection needs it.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinParity {
    ZeroPlus,
    TwoPlus,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct DaughterLevel {
    /// Excitation energy in MeV.
    pub energy: f64,
    pub spin: SpinParity,
    /// Gamma energies (MeV) emitted when the level de-excites.
    pub cascade: &'static [f64],
}

impl DaughterLevel {
    const fn ground() -> Self {
        Self { energy: 0.0, spin: SpinParity::ZeroPlus, cascade: &[] }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct DbdNuclide {
    pub name: &'static str,
    /// Charge of the daughter nucleus.
    pub z_daughter: i32,
    /// Mass number.
    pub a: u32,
    /// Q value of the ground state transition (MeV).
    pub q_value: f64,
    pub levels: &'static [DaughterLevel],
}

impl DbdNuclide {
    /// Energy shared by the two electrons (and neutrinos or Majorons) when
    /// decaying to `level`.
    pub fn transition_energy(&self, level: &DaughterLevel) -> f64 {
        self.q_value - level.energy
    }

    pub fn level(&self, index: u32) -> Option<&'static DaughterLevel> {
        self.levels.get(index as usize)
    }
}

pub static DBD_NUCLIDES: &[DbdNuclide] = &[
    DbdNuclide {
        name: "Ca48",
        z_daughter: 22,
        a: 48,
        q_value: 4.2681,
        levels: &[DaughterLevel::ground()],
    },
    DbdNuclide {
        name: "Ge76",
        z_daughter: 34,
        a: 76,
        q_value: 2.0391,
        levels: &[
            DaughterLevel::ground(),
            DaughterLevel { energy: 0.559101, spin: SpinParity::TwoPlus, cascade: &[0.559101] },
            DaughterLevel {
                energy: 1.122279,
                spin: SpinParity::ZeroPlus,
                cascade: &[0.563178, 0.559101],
            },
        ],
    },
    DbdNuclide {
        name: "Se82",
        z_daughter: 36,
        a: 82,
        q_value: 2.9979,
        levels: &[
            DaughterLevel::ground(),
            DaughterLevel { energy: 0.776517, spin: SpinParity::TwoPlus, cascade: &[0.776517] },
        ],
    },
    DbdNuclide {
        name: "Zr96",
        z_daughter: 42,
        a: 96,
        q_value: 3.3560,
        levels: &[
            DaughterLevel::ground(),
            DaughterLevel { energy: 0.778245, spin: SpinParity::TwoPlus, cascade: &[0.778245] },
        ],
    },
    DbdNuclide {
        name: "Mo100",
        z_daughter: 44,
        a: 100,
        q_value: 3.0344,
        levels: &[
            DaughterLevel::ground(),
            DaughterLevel { energy: 0.539510, spin: SpinParity::TwoPlus, cascade: &[0.539510] },
            DaughterLevel {
                energy: 1.130270,
                spin: SpinParity::ZeroPlus,
                cascade: &[0.590760, 0.539510],
            },
        ],
    },
    DbdNuclide {
        name: "Cd116",
        z_daughter: 50,
        a: 116,
        q_value: 2.8135,
        levels: &[
            DaughterLevel::ground(),
            DaughterLevel { energy: 1.293560, spin: SpinParity::TwoPlus, cascade: &[1.293560] },
        ],
    },
    DbdNuclide {
        name: "Te130",
        z_daughter: 54,
        a: 130,
        q_value: 2.5275,
        levels: &[
            DaughterLevel::ground(),
            DaughterLevel { energy: 0.536090, spin: SpinParity::TwoPlus, cascade: &[0.536090] },
        ],
    },
    DbdNuclide {
        name: "Xe136",
        z_daughter: 56,
        a: 136,
        q_value: 2.4578,
        levels: &[
            DaughterLevel::ground(),
            DaughterLevel { energy: 0.818514, spin: SpinParity::TwoPlus, cascade: &[0.818514] },
        ],
    },
    DbdNuclide {
        name: "Nd150",
        z_daughter: 62,
        a: 150,
        q_value: 3.3714,
        levels: &[
            DaughterLevel::ground(),
            DaughterLevel { energy: 0.333970, spin: SpinParity::TwoPlus, cascade: &[0.333970] },
            DaughterLevel {
                energy: 0.740490,
                spin: SpinParity::ZeroPlus,
                cascade: &[0.406520, 0.333970],
            },
        ],
    },
];

/// Look up a double beta nuclide by name, e.g. "Mo100".
pub fn find(name: &str) -> Option<&'static DbdNuclide> {
    DBD_NUCLIDES.iter().find(|n| n.name == name)
}
