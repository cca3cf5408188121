//! The character record.

use super::attributes::{Abilities, Ability};
use super::classes::{CharacterClass, Race};
use super::derived_stats::DerivedStats;
use super::progression::{experience_for_level, level_from_experience, proficiency_bonus, validate_level};
use super::proficiencies::{ArmorProficiency, Skill, WeaponProficiency};
use crate::combat::CastRequest;
use crate::error::{RulesError, ValidationError};
use crate::items::{best_loadout, suggest_loadout, EquipmentSlot, Loadout, LoadoutSuggestion};
use crate::spells::casting::max_spell_level_for_character;
use crate::spells::SpellRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub class: CharacterClass,
    pub race: Race,
    pub level: u8,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub abilities: Abilities,
    #[serde(default)]
    pub skills: BTreeSet<Skill>,
    #[serde(default)]
    pub armor_proficiencies: BTreeSet<ArmorProficiency>,
    #[serde(default)]
    pub weapon_proficiencies: BTreeSet<WeaponProficiency>,
    #[serde(default)]
    pub specific_weapons: Vec<String>,
    #[serde(default)]
    pub known_spells: Vec<SpellRef>,
    /// Item ids.
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub equipped: BTreeMap<EquipmentSlot, String>,
    #[serde(default)]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Character {
    /// A level 1 character with default ability scores.
    pub fn new(name: &str, class: CharacterClass, race: Race) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            class,
            race,
            level: 1,
            experience: 0,
            abilities: Abilities::new(),
            skills: BTreeSet::new(),
            armor_proficiencies: BTreeSet::new(),
            weapon_proficiencies: BTreeSet::new(),
            specific_weapons: Vec::new(),
            known_spells: Vec::new(),
            inventory: Vec::new(),
            equipped: BTreeMap::new(),
            last_saved: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName("character"));
        }
        let level = validate_level(self.level as i32)?;
        let minimum = experience_for_level(level)?;
        if self.experience < minimum {
            return Err(ValidationError::ExperienceBelowLevel {
                level,
                experience: self.experience,
                minimum,
            });
        }
        Ok(())
    }

    /// Adds experience and levels up as far as it reaches. Never lowers the level.
    ///
    /// Returns the number of levels gained.
    pub fn add_experience(&mut self, amount: u32) -> u8 {
        self.experience = self.experience.saturating_add(amount);
        let reached = level_from_experience(self.experience);
        let gained = reached.saturating_sub(self.level);
        if gained > 0 {
            self.level = reached;
            tracing::info!(name = %self.name, level = self.level, "character leveled up");
        }
        gained
    }

    /// Sets the level directly, raising experience to the new level's minimum if needed.
    pub fn set_level(&mut self, level: u8) -> Result<(), RulesError> {
        self.level = validate_level(level as i32)?;
        self.reconcile_experience();
        Ok(())
    }

    /// Raises experience to the current level's minimum.
    pub fn reconcile_experience(&mut self) {
        if let Ok(minimum) = experience_for_level(self.level) {
            self.experience = self.experience.max(minimum);
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    pub fn proficiency_bonus(&self) -> i32 {
        proficiency_bonus(self.level as i32)
    }

    pub fn derived(&self) -> DerivedStats {
        DerivedStats::from_character(self)
    }

    /// Modifier of the class casting ability, Intelligence for non-casters.
    pub fn casting_modifier(&self) -> i32 {
        self.modifier(self.class.casting_ability_or_default())
    }

    /// Highest spell level this character can cast, `None` for non-casters.
    pub fn max_spell_level(&self) -> Option<u8> {
        self.class
            .is_spellcaster()
            .then(|| max_spell_level_for_character(self.level))
    }

    /// Cast inputs from this character's casting modifier and proficiency bonus.
    pub fn cast_request(&self) -> CastRequest {
        CastRequest::new(self.casting_modifier(), self.proficiency_bonus())
    }

    pub fn knows_spell(&self, spell: &SpellRef) -> bool {
        self.known_spells.contains(spell)
    }

    /// Returns false if the spell was already known.
    pub fn learn_spell(&mut self, spell: SpellRef) -> bool {
        if self.knows_spell(&spell) {
            return false;
        }
        self.known_spells.push(spell);
        true
    }

    pub fn forget_spell(&mut self, spell: &SpellRef) -> bool {
        let before = self.known_spells.len();
        self.known_spells.retain(|s| s != spell);
        self.known_spells.len() != before
    }

    pub fn best_loadout(&self) -> Loadout {
        best_loadout(self.modifier(Ability::Dexterity), &self.armor_proficiencies)
    }

    pub fn suggest_loadout(&self) -> LoadoutSuggestion {
        suggest_loadout(self.modifier(Ability::Dexterity), &self.armor_proficiencies)
    }

    /// Stamps the save time.
    pub fn touch(&mut self) {
        self.last_saved = Some(Utc::now());
    }
}
