use super::attributes::Ability;
use super::progression::{experience_for_next_level, experience_remaining, proficiency_bonus};
use super::sheet::Character;
use crate::spells::casting::{spell_attack_bonus, spell_save_dc};
use serde::{Deserialize, Serialize};

/// Values shown on a character sheet, recomputed from base stats.
///
/// Never persisted as a source of truth; older records that stored these
/// strings are recomputed on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub proficiency_bonus: i32,
    /// `None` for classes without spellcasting.
    pub spell_save_dc: Option<i32>,
    pub spell_attack_bonus: Option<i32>,
    pub strength_attack: i32,
    pub dexterity_attack: i32,
    pub next_level_xp: Option<u32>,
    pub xp_remaining: Option<u32>,
}

impl DerivedStats {
    pub fn from_character(character: &Character) -> Self {
        let prof = proficiency_bonus(character.level as i32);

        let (spell_save_dc, spell_attack_bonus) = match character.class.spellcasting_ability() {
            Some(ability) => {
                let modifier = character.abilities.modifier(ability);
                (
                    Some(spell_save_dc(modifier, prof)),
                    Some(spell_attack_bonus(modifier, prof)),
                )
            }
            None => (None, None),
        };

        // Any weapon training adds proficiency to both attack lines.
        let weapon_prof = if character.weapon_proficiencies.is_empty() {
            0
        } else {
            prof
        };

        Self {
            proficiency_bonus: prof,
            spell_save_dc,
            spell_attack_bonus,
            strength_attack: character.abilities.modifier(Ability::Strength) + weapon_prof,
            dexterity_attack: character.abilities.modifier(Ability::Dexterity) + weapon_prof,
            next_level_xp: experience_for_next_level(character.level),
            xp_remaining: experience_remaining(character.level, character.experience),
        }
    }
}

/// Signed display form used on sheets: `+3`, `-1`, `+0`.
pub fn format_bonus(value: i32) -> String {
    format!("{value:+}")
}
