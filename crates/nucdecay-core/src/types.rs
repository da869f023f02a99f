//! Generator configuration value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Broad family of the modelled nuclear process.
///
/// # Examples
///
/// ```
/// use nucdecay_core::types::DecayCategory;
/// let c: DecayCategory = "dbd".parse().unwrap();
/// assert_eq!(c, DecayCategory::DoubleBeta);
/// assert_eq!(c.to_string(), "dbd");
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DecayCategory {
    /// Pure beta emitters decaying to the daughter ground state.
    SingleBeta,
    /// Two-electron decays, selected further by [`DbdMode`] and daughter level.
    DoubleBeta,
    /// Radioactive background sources with mixed alpha/beta/EC branches
    /// and gamma cascades.
    Background,
}

impl DecayCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleBeta => "single_beta",
            Self::DoubleBeta => "dbd",
            Self::Background => "background",
        }
    }
}

impl fmt::Display for DecayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecayCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_beta" | "sb" => Ok(Self::SingleBeta),
            "dbd" | "double_beta" => Ok(Self::DoubleBeta),
            "background" | "bkg" => Ok(Self::Background),
            other => Err(format!("unknown decay category: {other}")),
        }
    }
}

/// Double beta decay mode.
///
/// Numeric ids follow the conventional DBD mode numbering used in event files.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DbdMode {
    /// 0νββ with light neutrino mass mechanism, 0+ → 0+.
    NeutrinolessMass,
    /// 0νββ with right-handed current, 0+ → 0+.
    NeutrinolessRightHanded,
    /// 2νββ, 0+ → 0+.
    TwoNeutrino,
    /// 0νββ with Majoron emission, spectral index 1.
    MajoronN1,
    /// 0νββ with Majoron emission, spectral index 3.
    MajoronN3,
    /// 2νββ, 0+ → 2+.
    TwoNeutrinoToTwoPlus,
    /// 0νββ with Majoron emission, spectral index 7.
    MajoronN7,
}

impl DbdMode {
    pub const ALL: [DbdMode; 7] = [
        Self::NeutrinolessMass,
        Self::NeutrinolessRightHanded,
        Self::TwoNeutrino,
        Self::MajoronN1,
        Self::MajoronN3,
        Self::TwoNeutrinoToTwoPlus,
        Self::MajoronN7,
    ];

    pub fn id(&self) -> u32 {
        match self {
            Self::NeutrinolessMass => 1,
            Self::NeutrinolessRightHanded => 2,
            Self::TwoNeutrino => 4,
            Self::MajoronN1 => 5,
            Self::MajoronN3 => 6,
            Self::TwoNeutrinoToTwoPlus => 8,
            Self::MajoronN7 => 13,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    /// Whether the two electrons share the full transition energy.
    pub fn is_neutrinoless(&self) -> bool {
        matches!(self, Self::NeutrinolessMass | Self::NeutrinolessRightHanded)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NeutrinolessMass => "0nubb(mn) 0+ -> 0+",
            Self::NeutrinolessRightHanded => "0nubb(rhc) 0+ -> 0+",
            Self::TwoNeutrino => "2nubb 0+ -> 0+",
            Self::MajoronN1 => "0nubbM1 0+ -> 0+",
            Self::MajoronN3 => "0nubbM3 0+ -> 0+",
            Self::TwoNeutrinoToTwoPlus => "2nubb 0+ -> 2+",
            Self::MajoronN7 => "0nubbM7 0+ -> 0+",
        }
    }
}

impl fmt::Display for DbdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for DbdMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<u32>() {
            return Self::from_id(id).ok_or_else(|| format!("unknown dbd mode id: {id}"));
        }
        match s {
            "0nubb_mn" | "neutrinoless_mass" => Ok(Self::NeutrinolessMass),
            "0nubb_rhc" | "neutrinoless_right_handed" => Ok(Self::NeutrinolessRightHanded),
            "2nubb" | "two_neutrino" => Ok(Self::TwoNeutrino),
            "0nubbM1" | "majoron_n1" => Ok(Self::MajoronN1),
            "0nubbM3" | "majoron_n3" => Ok(Self::MajoronN3),
            "2nubb_2+" | "two_neutrino_to_two_plus" => Ok(Self::TwoNeutrinoToTwoPlus),
            "0nubbM7" | "majoron_n7" => Ok(Self::MajoronN7),
            other => Err(format!("unknown dbd mode: {other}")),
        }
    }
}

/// Inclusive kinetic energy sum window in MeV.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct EnergyWindow {
    pub lower: f64,
    pub upper: f64,
}

impl EnergyWindow {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Check bounds are finite, non-negative and ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for bound in [self.lower, self.upper] {
            if !bound.is_finite() || bound < 0.0 {
                return Err(ConfigError::InvalidWindow(bound));
            }
        }
        if self.lower > self.upper {
            return Err(ConfigError::InvertedWindow {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }

    pub fn contains(&self, energy: f64) -> bool {
        energy >= self.lower && energy <= self.upper
    }
}

/// Everything needed to resolve a spectrum sampler.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DecayConfig {
    pub category: Option<DecayCategory>,
    /// Isotope identifier, e.g. "Mo100".
    pub isotope: Option<String>,
    /// Daughter energy level index (double beta only; 0 is the ground state).
    #[serde(default)]
    pub level: u32,
    pub mode: Option<DbdMode>,
    pub energy_window: Option<EnergyWindow>,
}

impl DecayConfig {
    /// Double beta configuration shorthand.
    pub fn dbd(isotope: &str, level: u32, mode: DbdMode) -> Self {
        Self {
            category: Some(DecayCategory::DoubleBeta),
            isotope: Some(isotope.to_string()),
            level,
            mode: Some(mode),
            energy_window: None,
        }
    }

    /// Single beta or background configuration shorthand.
    pub fn source(category: DecayCategory, isotope: &str) -> Self {
        Self {
            category: Some(category),
            isotope: Some(isotope.to_string()),
            ..Self::default()
        }
    }

    pub fn with_window(mut self, lower: f64, upper: f64) -> Self {
        self.energy_window = Some(EnergyWindow::new(lower, upper));
        self
    }
}
