//! Classes, races and the class → spellcasting ability mapping.

use super::attributes::Ability;
use crate::error::RulesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 12] {
        [
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Warlock,
            CharacterClass::Wizard,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Wizard => "Wizard",
        }
    }

    /// Ability that drives spell save DC and spell attacks. `None` for non-casters.
    pub fn spellcasting_ability(&self) -> Option<Ability> {
        match self {
            CharacterClass::Wizard => Some(Ability::Intelligence),
            CharacterClass::Cleric | CharacterClass::Druid | CharacterClass::Ranger => {
                Some(Ability::Wisdom)
            }
            CharacterClass::Bard
            | CharacterClass::Warlock
            | CharacterClass::Paladin
            | CharacterClass::Sorcerer => Some(Ability::Charisma),
            CharacterClass::Barbarian
            | CharacterClass::Fighter
            | CharacterClass::Monk
            | CharacterClass::Rogue => None,
        }
    }

    pub fn is_spellcaster(&self) -> bool {
        self.spellcasting_ability().is_some()
    }

    /// Casting ability, with Intelligence standing in for classes that do not cast.
    pub fn casting_ability_or_default(&self) -> Ability {
        self.spellcasting_ability().unwrap_or(Ability::Intelligence)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let class = match s.trim().to_lowercase().as_str() {
            "barbarian" | "bárbaro" | "barbaro" => CharacterClass::Barbarian,
            "bard" | "bardo" => CharacterClass::Bard,
            "cleric" | "clérigo" | "clerigo" => CharacterClass::Cleric,
            "druid" | "druida" => CharacterClass::Druid,
            "fighter" | "guerrero" => CharacterClass::Fighter,
            "monk" | "monje" => CharacterClass::Monk,
            "paladin" | "paladín" => CharacterClass::Paladin,
            "ranger" | "explorador" => CharacterClass::Ranger,
            "rogue" | "pícaro" | "picaro" => CharacterClass::Rogue,
            "sorcerer" | "hechicero" => CharacterClass::Sorcerer,
            "warlock" | "brujo" => CharacterClass::Warlock,
            "wizard" | "mage" | "mago" => CharacterClass::Wizard,
            _ => return Err(RulesError::UnknownClass(s.to_string())),
        };
        Ok(class)
    }
}

/// Resolves a class name to its primary casting ability.
///
/// Unknown names are an error; known non-casters get Intelligence.
pub fn primary_ability_for_class(class_name: &str) -> Result<Ability, RulesError> {
    class_name
        .parse::<CharacterClass>()
        .map(|class| class.casting_ability_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Human,
    Elf,
    Dwarf,
    Halfling,
    Gnome,
    HalfElf,
    HalfOrc,
    Tiefling,
    Dragonborn,
}

impl Race {
    pub fn name(&self) -> &'static str {
        match self {
            Race::Human => "Human",
            Race::Elf => "Elf",
            Race::Dwarf => "Dwarf",
            Race::Halfling => "Halfling",
            Race::Gnome => "Gnome",
            Race::HalfElf => "Half-Elf",
            Race::HalfOrc => "Half-Orc",
            Race::Tiefling => "Tiefling",
            Race::Dragonborn => "Dragonborn",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casting_ability_buckets() {
        assert_eq!(
            CharacterClass::Wizard.spellcasting_ability(),
            Some(Ability::Intelligence)
        );
        for class in [
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Ranger,
        ] {
            assert_eq!(class.spellcasting_ability(), Some(Ability::Wisdom));
        }
        for class in [
            CharacterClass::Bard,
            CharacterClass::Warlock,
            CharacterClass::Paladin,
            CharacterClass::Sorcerer,
        ] {
            assert_eq!(class.spellcasting_ability(), Some(Ability::Charisma));
        }
    }

    #[test]
    fn test_non_casters() {
        for class in [
            CharacterClass::Barbarian,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Rogue,
        ] {
            assert!(!class.is_spellcaster());
            assert_eq!(class.casting_ability_or_default(), Ability::Intelligence);
        }
    }

    #[test]
    fn test_primary_ability_for_class_names() {
        assert_eq!(primary_ability_for_class("Sorcerer"), Ok(Ability::Charisma));
        assert_eq!(primary_ability_for_class("hechicero"), Ok(Ability::Charisma));
        assert_eq!(primary_ability_for_class("Clérigo"), Ok(Ability::Wisdom));
        assert_eq!(primary_ability_for_class("Fighter"), Ok(Ability::Intelligence));
        assert_eq!(
            primary_ability_for_class("Artificer"),
            Err(RulesError::UnknownClass("Artificer".to_string()))
        );
    }

    #[test]
    fn test_class_name_round_trip() {
        for class in CharacterClass::all() {
            assert_eq!(class.name().parse::<CharacterClass>().unwrap(), class);
        }
    }
}
