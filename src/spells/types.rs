use crate::character::attributes::Ability;
use crate::character::classes::CharacterClass;
use crate::core::constants::MAX_SPELL_LEVEL;
use crate::dice::DiceFormula;
use crate::error::{RulesError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum School {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
}

impl School {
    pub fn all() -> [School; 8] {
        [
            School::Abjuration,
            School::Conjuration,
            School::Divination,
            School::Enchantment,
            School::Evocation,
            School::Illusion,
            School::Necromancy,
            School::Transmutation,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            School::Abjuration => "Abjuration",
            School::Conjuration => "Conjuration",
            School::Divination => "Divination",
            School::Enchantment => "Enchantment",
            School::Evocation => "Evocation",
            School::Illusion => "Illusion",
            School::Necromancy => "Necromancy",
            School::Transmutation => "Transmutation",
        }
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for School {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let school = match s.trim().to_lowercase().as_str() {
            "abjuration" | "abjuración" | "abjuracion" => School::Abjuration,
            "conjuration" | "conjuración" | "conjuracion" => School::Conjuration,
            "divination" | "adivinación" | "adivinacion" => School::Divination,
            "enchantment" | "encantamiento" => School::Enchantment,
            "evocation" | "evocación" | "evocacion" => School::Evocation,
            "illusion" | "ilusión" | "ilusion" => School::Illusion,
            "necromancy" | "nigromancia" => School::Necromancy,
            "transmutation" | "transmutación" | "transmutacion" => School::Transmutation,
            _ => return Err(format!("unknown school of magic '{s}'")),
        };
        Ok(school)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackType {
    #[default]
    None,
    Melee,
    Ranged,
}

impl AttackType {
    pub fn requires_roll(&self) -> bool {
        !matches!(self, AttackType::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Acid,
    Bludgeoning,
    Cold,
    Fire,
    Force,
    Lightning,
    Necrotic,
    Piercing,
    Poison,
    Psychic,
    Radiant,
    Slashing,
    Thunder,
}

impl DamageType {
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Acid => "acid",
            DamageType::Bludgeoning => "bludgeoning",
            DamageType::Cold => "cold",
            DamageType::Fire => "fire",
            DamageType::Force => "force",
            DamageType::Lightning => "lightning",
            DamageType::Necrotic => "necrotic",
            DamageType::Piercing => "piercing",
            DamageType::Poison => "poison",
            DamageType::Psychic => "psychic",
            DamageType::Radiant => "radiant",
            DamageType::Slashing => "slashing",
            DamageType::Thunder => "thunder",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a target that succeeds on its save still suffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SaveEffect {
    #[default]
    NoDamage,
    HalfDamage,
    ReducedEffect,
}

impl fmt::Display for SaveEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SaveEffect::NoDamage => "no damage",
            SaveEffect::HalfDamage => "half damage",
            SaveEffect::ReducedEffect => "reduced effect",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrow {
    pub ability: Ability,
    #[serde(default)]
    pub on_success: SaveEffect,
}

/// A spell record.
///
/// Formula fields hold dice notation; an empty string means the spell does not roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub level: u8,
    pub school: School,
    #[serde(default)]
    pub casting_time: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub components: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub attack_type: AttackType,
    #[serde(default)]
    pub saving_throw: Option<SavingThrow>,
    #[serde(default)]
    pub damage: String,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default)]
    pub healing: String,
    #[serde(default)]
    pub damage_per_level: String,
    #[serde(default)]
    pub healing_per_level: String,
    pub classes: Vec<CharacterClass>,
    #[serde(default)]
    pub description: String,
}

impl Spell {
    /// A spell with no rolls, available to `classes`.
    pub fn new(name: &str, level: u8, school: School, classes: &[CharacterClass]) -> Self {
        Self {
            name: name.to_string(),
            level,
            school,
            casting_time: "1 action".to_string(),
            range: String::new(),
            components: String::new(),
            duration: "Instantaneous".to_string(),
            attack_type: AttackType::None,
            saving_throw: None,
            damage: String::new(),
            damage_type: None,
            healing: String::new(),
            damage_per_level: String::new(),
            healing_per_level: String::new(),
            classes: classes.to_vec(),
            description: String::new(),
        }
    }

    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    pub fn key(&self) -> SpellRef {
        SpellRef {
            name: self.name.clone(),
            level: self.level,
        }
    }

    pub fn is_available_to(&self, class: CharacterClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName("spell"));
        }
        if self.level > MAX_SPELL_LEVEL {
            return Err(RulesError::SpellLevelOutOfRange(self.level as i32).into());
        }
        if self.classes.is_empty() {
            return Err(ValidationError::NoClasses(self.name.clone()));
        }

        let formulas = [
            ("damage", &self.damage),
            ("healing", &self.healing),
            ("damage_per_level", &self.damage_per_level),
            ("healing_per_level", &self.healing_per_level),
        ];
        for (field, formula) in formulas {
            DiceFormula::parse(formula)
                .map_err(|source| ValidationError::Formula { field, source })?;
        }
        Ok(())
    }
}

/// Identifies a spell by name and level. Names compare case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellRef {
    pub name: String,
    pub level: u8,
}

impl SpellRef {
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
        }
    }

    pub fn matches(&self, spell: &Spell) -> bool {
        self.level == spell.level && self.name.eq_ignore_ascii_case(spell.name.trim())
    }
}

impl PartialEq for SpellRef {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for SpellRef {}

impl fmt::Display for SpellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (level {})", self.name, self.level)
    }
}
