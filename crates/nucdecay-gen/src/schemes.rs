//! Decay schemes for single beta emitters and background sources.
//!
//! A scheme is a list of branches. Each branch emits one primary particle
//! (β−, β+, alpha, or nothing for electron capture) and then walks a gamma
//! cascade through the daughter levels. A transition may be internally
//! converted, emitting an electron of `Eγ − E_binding` instead of the gamma,
//! and a long-lived level delays everything after it by an exponential time
//! offset. Atomic X-rays and Auger electrons are not emitted.

use serde::Serialize;

use nucdecay_core::event::Event;
use nucdecay_core::particle::{Particle, ParticleCode};
use nucdecay_core::random::{UniformRandom, exponential_delay};
use nucdecay_core::traits::SpectrumSampler;
use nucdecay_core::types::DecayCategory;

use crate::beta::BetaSpectrum;
use crate::kinematics::isotropic_direction;

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub enum Primary {
    BetaMinus { q: f64 },
    BetaPlus { q: f64 },
    Alpha { energy: f64 },
    ElectronCapture,
}

impl Primary {
    /// Largest kinetic energy the primary can carry (MeV).
    pub fn max_kinetic(&self) -> f64 {
        match *self {
            Self::BetaMinus { q } | Self::BetaPlus { q } => q,
            Self::Alpha { energy } => energy,
            Self::ElectronCapture => 0.0,
        }
    }

    /// Smallest kinetic energy the primary can carry (MeV).
    pub fn min_kinetic(&self) -> f64 {
        match *self {
            Self::Alpha { energy } => energy,
            _ => 0.0,
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Conversion {
    /// Total internal conversion coefficient α.
    pub coefficient: f64,
    /// Binding energy of the ejected electron (MeV).
    pub binding: f64,
}

impl Conversion {
    /// Probability that the transition emits an electron instead of a gamma.
    pub fn probability(&self) -> f64 {
        self.coefficient / (1.0 + self.coefficient)
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct GammaTransition {
    pub energy: f64,
    /// Half-life (s) of the level the transition depopulates; 0 for prompt.
    pub half_life: f64,
    pub conversion: Option<Conversion>,
}

impl GammaTransition {
    const fn prompt(energy: f64) -> Self {
        Self { energy, half_life: 0.0, conversion: None }
    }

    /// Smallest kinetic energy the transition can emit: the conversion
    /// electron energy when it can convert, the gamma energy otherwise.
    pub fn min_kinetic(&self) -> f64 {
        match self.conversion {
            Some(c) => self.energy - c.binding,
            None => self.energy,
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub probability: f64,
    pub primary: Primary,
    pub cascade: &'static [GammaTransition],
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct DecayScheme {
    pub name: &'static str,
    pub category: DecayCategory,
    /// Charge of the daughter nucleus of the primary decay; sets the
    /// Coulomb correction of β∓ spectra.
    pub z_daughter: i32,
    pub a: u32,
    pub branches: &'static [Branch],
}

impl DecayScheme {
    /// Largest kinetic energy sum any branch can produce.
    pub fn max_energy_sum(&self) -> f64 {
        self.branches
            .iter()
            .map(|b| b.primary.max_kinetic() + b.cascade.iter().map(|g| g.energy).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Smallest kinetic energy sum any branch can produce.
    pub fn min_energy_sum(&self) -> f64 {
        self.branches
            .iter()
            .map(|b| {
                b.primary.min_kinetic() + b.cascade.iter().map(|g| g.min_kinetic()).sum::<f64>()
            })
            .fold(f64::INFINITY, f64::min)
    }
}

pub static SINGLE_BETA_SCHEMES: &[DecayScheme] = &[
    DecayScheme {
        name: "H3",
        category: DecayCategory::SingleBeta,
        z_daughter: 2,
        a: 3,
        branches: &[Branch {
            probability: 1.0,
            primary: Primary::BetaMinus { q: 0.018591 },
            cascade: &[],
        }],
    },
    DecayScheme {
        name: "C14",
        category: DecayCategory::SingleBeta,
        z_daughter: 7,
        a: 14,
        branches: &[Branch {
            probability: 1.0,
            primary: Primary::BetaMinus { q: 0.156476 },
            cascade: &[],
        }],
    },
    DecayScheme {
        name: "Sr90",
        category: DecayCategory::SingleBeta,
        z_daughter: 39,
        a: 90,
        branches: &[Branch {
            probability: 1.0,
            primary: Primary::BetaMinus { q: 0.5459 },
            cascade: &[],
        }],
    },
    DecayScheme {
        name: "Y90",
        category: DecayCategory::SingleBeta,
        z_daughter: 40,
        a: 90,
        branches: &[Branch {
            probability: 1.0,
            primary: Primary::BetaMinus { q: 2.2785 },
            cascade: &[],
        }],
    },
    DecayScheme {
        name: "Bi210",
        category: DecayCategory::SingleBeta,
        z_daughter: 84,
        a: 210,
        branches: &[Branch {
            probability: 1.0,
            primary: Primary::BetaMinus { q: 1.1622 },
            cascade: &[],
        }],
    },
    DecayScheme {
        name: "P32",
        category: DecayCategory::SingleBeta,
        z_daughter: 16,
        a: 32,
        branches: &[Branch {
            probability: 1.0,
            primary: Primary::BetaMinus { q: 1.71066 },
            cascade: &[],
        }],
    },
];

pub static BACKGROUND_SCHEMES: &[DecayScheme] = &[
    DecayScheme {
        name: "Co60",
        category: DecayCategory::Background,
        z_daughter: 28,
        a: 60,
        branches: &[
            Branch {
                probability: 0.9988,
                primary: Primary::BetaMinus { q: 0.3179 },
                cascade: &[GammaTransition::prompt(1.173228), GammaTransition::prompt(1.332492)],
            },
            Branch {
                probability: 0.0012,
                primary: Primary::BetaMinus { q: 1.4910 },
                cascade: &[GammaTransition::prompt(1.332492)],
            },
        ],
    },
    DecayScheme {
        name: "Cs137",
        category: DecayCategory::Background,
        z_daughter: 56,
        a: 137,
        branches: &[
            Branch {
                probability: 0.9436,
                primary: Primary::BetaMinus { q: 0.5140 },
                cascade: &[GammaTransition {
                    energy: 0.661657,
                    half_life: 153.12,
                    conversion: Some(Conversion { coefficient: 0.1124, binding: 0.037441 }),
                }],
            },
            Branch { probability: 0.0564, primary: Primary::BetaMinus { q: 1.1756 }, cascade: &[] },
        ],
    },
    DecayScheme {
        name: "K40",
        category: DecayCategory::Background,
        z_daughter: 20,
        a: 40,
        branches: &[
            Branch {
                probability: 0.8928,
                primary: Primary::BetaMinus { q: 1.31107 },
                cascade: &[],
            },
            Branch {
                probability: 0.1072,
                primary: Primary::ElectronCapture,
                cascade: &[GammaTransition::prompt(1.460820)],
            },
        ],
    },
    DecayScheme {
        name: "Na22",
        category: DecayCategory::Background,
        z_daughter: 10,
        a: 22,
        branches: &[
            Branch {
                probability: 0.9030,
                primary: Primary::BetaPlus { q: 0.5459 },
                cascade: &[GammaTransition::prompt(1.274537)],
            },
            Branch {
                probability: 0.0970,
                primary: Primary::ElectronCapture,
                cascade: &[GammaTransition::prompt(1.274537)],
            },
        ],
    },
    DecayScheme {
        name: "Am241",
        category: DecayCategory::Background,
        z_daughter: 93,
        a: 241,
        branches: &[
            Branch {
                probability: 0.848,
                primary: Primary::Alpha { energy: 5.4856 },
                cascade: &[GammaTransition {
                    energy: 0.059541,
                    half_life: 67e-9,
                    conversion: Some(Conversion { coefficient: 1.16, binding: 0.0218 }),
                }],
            },
            Branch {
                probability: 0.152,
                primary: Primary::Alpha { energy: 5.4429 },
                cascade: &[
                    GammaTransition::prompt(0.043420),
                    GammaTransition {
                        energy: 0.059541,
                        half_life: 67e-9,
                        conversion: Some(Conversion { coefficient: 1.16, binding: 0.0218 }),
                    },
                ],
            },
        ],
    },
];

/// All schemes shipped for `category`. Double beta nuclides live in
/// [`crate::nuclides`].
pub fn schemes(category: DecayCategory) -> &'static [DecayScheme] {
    match category {
        DecayCategory::SingleBeta => SINGLE_BETA_SCHEMES,
        DecayCategory::Background => BACKGROUND_SCHEMES,
        DecayCategory::DoubleBeta => &[],
    }
}

pub fn find(category: DecayCategory, name: &str) -> Option<&'static DecayScheme> {
    schemes(category).iter().find(|s| s.name == name)
}

/// Samples one decay of a [`DecayScheme`].
#[derive(Debug, Clone)]
pub struct SchemeSampler {
    scheme: &'static DecayScheme,
    /// One prepared beta spectrum per branch, `None` for non-beta primaries.
    spectra: Vec<Option<BetaSpectrum>>,
    total_probability: f64,
}

impl SchemeSampler {
    pub fn new(scheme: &'static DecayScheme) -> Self {
        let spectra = scheme
            .branches
            .iter()
            .map(|b| match b.primary {
                Primary::BetaMinus { q } => {
                    Some(BetaSpectrum::electron(scheme.z_daughter, scheme.a, q))
                }
                Primary::BetaPlus { q } => {
                    Some(BetaSpectrum::positron(scheme.z_daughter, scheme.a, q))
                }
                Primary::Alpha { .. } | Primary::ElectronCapture => None,
            })
            .collect();
        let total_probability = scheme.branches.iter().map(|b| b.probability).sum();
        Self { scheme, spectra, total_probability }
    }

    pub fn scheme(&self) -> &'static DecayScheme {
        self.scheme
    }

    fn pick_branch(&self, prng: &mut dyn UniformRandom) -> usize {
        let mut x = prng.uniform() * self.total_probability;
        let last = self.scheme.branches.len().saturating_sub(1);
        for (i, b) in self.scheme.branches.iter().enumerate() {
            if x < b.probability {
                return i;
            }
            x -= b.probability;
        }
        last
    }
}

impl SpectrumSampler for SchemeSampler {
    fn shoot(&mut self, prng: &mut dyn UniformRandom, event: &mut Event) {
        let index = self.pick_branch(prng);
        let branch = &self.scheme.branches[index];

        match (branch.primary, &self.spectra[index]) {
            (Primary::BetaMinus { .. }, Some(spectrum)) => {
                let t = spectrum.sample(prng);
                let d = isotropic_direction(prng);
                event.add_particle(Particle::with_kinetic_energy(
                    ParticleCode::Electron,
                    0.0,
                    t,
                    d.into(),
                ));
            }
            (Primary::BetaPlus { .. }, Some(spectrum)) => {
                let t = spectrum.sample(prng);
                let d = isotropic_direction(prng);
                event.add_particle(Particle::with_kinetic_energy(
                    ParticleCode::Positron,
                    0.0,
                    t,
                    d.into(),
                ));
            }
            (Primary::Alpha { energy }, _) => {
                let d = isotropic_direction(prng);
                event.add_particle(Particle::with_kinetic_energy(
                    ParticleCode::Alpha,
                    0.0,
                    energy,
                    d.into(),
                ));
            }
            _ => {}
        }

        let mut time = 0.0;
        for gamma in branch.cascade {
            time += exponential_delay(prng, gamma.half_life);
            let converted = gamma
                .conversion
                .filter(|c| prng.uniform() < c.probability());
            let d: [f64; 3] = isotropic_direction(prng).into();
            let particle = match converted {
                Some(c) => Particle::with_kinetic_energy(
                    ParticleCode::Electron,
                    time,
                    gamma.energy - c.binding,
                    d,
                ),
                None => Particle::with_kinetic_energy(ParticleCode::Gamma, time, gamma.energy, d),
            };
            event.add_particle(particle);
        }
    }

    fn description(&self) -> String {
        format!(
            "{} {} decay, {} branch(es)",
            self.scheme.name,
            self.scheme.category,
            self.scheme.branches.len()
        )
    }

    fn max_energy_sum(&self) -> Option<f64> {
        Some(self.scheme.max_energy_sum())
    }

    fn min_energy_sum(&self) -> Option<f64> {
        Some(self.scheme.min_energy_sum())
    }
}
