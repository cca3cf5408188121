use crate::core::constants::{
    BASE_ABILITY_SCORE, MAX_ABILITY_SCORE, MIN_ABILITY_SCORE, NUM_ABILITIES,
};
use crate::error::RulesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn all() -> [Ability; NUM_ABILITIES] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Ability::Strength => 0,
            Ability::Dexterity => 1,
            Ability::Constitution => 2,
            Ability::Intelligence => 3,
            Ability::Wisdom => 4,
            Ability::Charisma => 5,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ability {
    type Err = RulesError;

    /// Accepts English names, abbreviations and the Spanish labels found in older data files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" | "fuerza" => Ok(Ability::Strength),
            "dexterity" | "dex" | "destreza" => Ok(Ability::Dexterity),
            "constitution" | "con" | "constitución" | "constitucion" => {
                Ok(Ability::Constitution)
            }
            "intelligence" | "int" | "inteligencia" => Ok(Ability::Intelligence),
            "wisdom" | "wis" | "sabiduría" | "sabiduria" => Ok(Ability::Wisdom),
            "charisma" | "cha" | "carisma" => Ok(Ability::Charisma),
            _ => Err(RulesError::UnknownAbility(s.to_string())),
        }
    }
}

/// Modifier for a raw score: `floor((score - 10) / 2)`.
pub fn ability_modifier(score: i32) -> i32 {
    (score - BASE_ABILITY_SCORE).div_euclid(2)
}

/// A single ability score in `1..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AbilityScore(i32);

impl AbilityScore {
    pub fn new(score: i32) -> Result<Self, RulesError> {
        if (MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(&score) {
            Ok(Self(score))
        } else {
            Err(RulesError::AbilityScoreOutOfRange(score))
        }
    }

    /// Clamps raw form input into range instead of rejecting it.
    pub fn clamped(score: i32) -> Self {
        Self(score.clamp(MIN_ABILITY_SCORE, MAX_ABILITY_SCORE))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn modifier(&self) -> i32 {
        ability_modifier(self.0)
    }
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self(BASE_ABILITY_SCORE)
    }
}

impl TryFrom<i32> for AbilityScore {
    type Error = RulesError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AbilityScore> for i32 {
    fn from(score: AbilityScore) -> Self {
        score.0
    }
}

/// The six ability scores of a character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Abilities {
    scores: [AbilityScore; NUM_ABILITIES],
}

impl Default for Abilities {
    fn default() -> Self {
        Self::new()
    }
}

impl Abilities {
    pub fn new() -> Self {
        Self {
            scores: [AbilityScore::default(); NUM_ABILITIES],
        }
    }

    /// Builds from raw scores in STR, DEX, CON, INT, WIS, CHA order.
    pub fn from_scores(scores: [i32; NUM_ABILITIES]) -> Result<Self, RulesError> {
        let mut abilities = Self::new();
        for (ability, score) in Ability::all().into_iter().zip(scores) {
            abilities.set(ability, score)?;
        }
        Ok(abilities)
    }

    pub fn get(&self, ability: Ability) -> i32 {
        self.scores[ability.index()].value()
    }

    pub fn set(&mut self, ability: Ability, score: i32) -> Result<(), RulesError> {
        self.scores[ability.index()] = AbilityScore::new(score)?;
        Ok(())
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.scores[ability.index()].modifier()
    }
}
