use crate::character::attributes::Ability;
use crate::core::constants::DEFAULT_TARGET_SAVE_BONUS;
use crate::spells::{DamageType, SaveEffect};
use serde::{Deserialize, Serialize};

/// A d20 attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRoll {
    pub d20: u32,
    pub bonus: i32,
    pub total: i32,
    /// Natural 20.
    pub critical: bool,
    /// Natural 1.
    pub fumble: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrowOutcome {
    pub ability: Ability,
    pub d20: u32,
    pub bonus: i32,
    pub total: i32,
    pub dc: i32,
    pub success: bool,
    pub effect: SaveEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Rolled formula, empty when the spell deals no damage.
    pub formula: String,
    pub min: i32,
    pub max: i32,
    pub rolled: i32,
    pub damage_type: Option<DamageType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealingResult {
    pub formula: String,
    /// Caster modifier added because the base formula had none of its own.
    pub caster_modifier: i32,
    pub min: i32,
    pub max: i32,
    pub rolled: i32,
}

/// Inputs for one simulated cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastRequest {
    /// Slot level; `None` casts at the spell's own level.
    pub cast_level: Option<u8>,
    pub ability_mod: i32,
    pub proficiency_bonus: i32,
    pub target_save_bonus: i32,
}

impl CastRequest {
    pub fn new(ability_mod: i32, proficiency_bonus: i32) -> Self {
        Self {
            cast_level: None,
            ability_mod,
            proficiency_bonus,
            target_save_bonus: DEFAULT_TARGET_SAVE_BONUS,
        }
    }

    pub fn at_level(mut self, cast_level: u8) -> Self {
        self.cast_level = Some(cast_level);
        self
    }

    pub fn with_target_save_bonus(mut self, bonus: i32) -> Self {
        self.target_save_bonus = bonus;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastResult {
    pub spell_name: String,
    pub spell_level: u8,
    pub cast_level: u8,
    pub save_dc: i32,
    pub attack_bonus: i32,
    pub attack: Option<AttackRoll>,
    pub save: Option<SavingThrowOutcome>,
    pub damage: DamageResult,
    pub healing: HealingResult,
}

impl CastResult {
    pub fn is_upcast(&self) -> bool {
        self.cast_level > self.spell_level
    }
}
