//! Skill, armor and weapon proficiencies.

use crate::error::RulesError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

/// Armor training. One canonical vocabulary; see [`ArmorProficiency::label`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorProficiency {
    Light,
    Medium,
    Heavy,
    Shield,
}

impl ArmorProficiency {
    pub fn all() -> [ArmorProficiency; 4] {
        [
            ArmorProficiency::Light,
            ArmorProficiency::Medium,
            ArmorProficiency::Heavy,
            ArmorProficiency::Shield,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArmorProficiency::Light => "Light armor",
            ArmorProficiency::Medium => "Medium armor",
            ArmorProficiency::Heavy => "Heavy armor",
            ArmorProficiency::Shield => "Shields",
        }
    }
}

impl fmt::Display for ArmorProficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ArmorProficiency {
    type Err = RulesError;

    /// Normalizes the category keys and the display strings used by older records.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" | "light armor" | "ligeras" | "armadura ligera" => Ok(ArmorProficiency::Light),
            "medium" | "medium armor" | "medias" | "armadura media" => {
                Ok(ArmorProficiency::Medium)
            }
            "heavy" | "heavy armor" | "pesadas" | "armadura pesada" => {
                Ok(ArmorProficiency::Heavy)
            }
            "shield" | "shields" | "escudo" | "escudos" => Ok(ArmorProficiency::Shield),
            _ => Err(RulesError::UnknownProficiency(s.to_string())),
        }
    }
}

/// Parses a list of proficiency strings into the canonical set.
pub fn parse_armor_proficiencies<S: AsRef<str>>(
    labels: &[S],
) -> Result<BTreeSet<ArmorProficiency>, RulesError> {
    labels.iter().map(|l| l.as_ref().parse()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponProficiency {
    Simple,
    Martial,
}

impl FromStr for WeaponProficiency {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "simples" => Ok(WeaponProficiency::Simple),
            "martial" | "marciales" => Ok(WeaponProficiency::Martial),
            _ => Err(RulesError::UnknownProficiency(s.to_string())),
        }
    }
}
