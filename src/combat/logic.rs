//! Attack, saving throw and spell cast simulation.
//!
//! Pure functions over an injected RNG so casts replay exactly under a seed.

use super::types::*;
use crate::character::attributes::Ability;
use crate::core::constants::{D20_SIDES, NATURAL_CRIT, NATURAL_FUMBLE};
use crate::dice::DiceFormula;
use crate::error::RulesError;
use crate::spells::casting::{
    levels_above_base, scale_parsed, spell_attack_bonus, spell_save_dc, validate_cast_level,
};
use crate::spells::{SaveEffect, Spell};
use rand::Rng;

fn roll_d20(rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=D20_SIDES)
}

/// Parses a spell formula field. A malformed formula counts as no formula.
fn cast_formula(spell: &Spell, field: &'static str, formula: &str) -> Option<DiceFormula> {
    match DiceFormula::parse(formula) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(spell = %spell.name, field, error = %e, "ignoring malformed formula");
            None
        }
    }
}

/// Roll a d20 attack.
///
/// # Arguments
/// * `bonus` - Attack bonus added to the die
/// * `rng` - Random number generator
pub fn roll_attack(bonus: i32, rng: &mut impl Rng) -> AttackRoll {
    let d20 = roll_d20(rng);
    AttackRoll {
        d20,
        bonus,
        total: d20 as i32 + bonus,
        critical: d20 == NATURAL_CRIT,
        fumble: d20 == NATURAL_FUMBLE,
    }
}

/// Roll a target's saving throw against `dc`. Meeting the DC is a success.
pub fn roll_saving_throw(
    ability: Ability,
    dc: i32,
    save_bonus: i32,
    effect: SaveEffect,
    rng: &mut impl Rng,
) -> SavingThrowOutcome {
    let d20 = roll_d20(rng);
    let total = d20 as i32 + save_bonus;
    SavingThrowOutcome {
        ability,
        d20,
        bonus: save_bonus,
        total,
        dc,
        success: total >= dc,
        effect,
    }
}

/// Simulate casting `spell`.
///
/// # Arguments
/// * `spell` - Spell being cast
/// * `request` - Slot level, caster modifiers and the target's save bonus
/// * `rng` - Random number generator
///
/// # Returns
/// Attack and save rolls where the spell calls for them, plus damage and
/// healing (zero when the spell has no formula for them).
///
/// # Errors
/// A slot below the spell's level or above 9. Malformed formulas roll nothing.
pub fn simulate_cast(
    spell: &Spell,
    request: &CastRequest,
    rng: &mut impl Rng,
) -> Result<CastResult, RulesError> {
    let cast_level = request.cast_level.unwrap_or(spell.level);
    validate_cast_level(spell.level, cast_level)?;
    let extra_levels = levels_above_base(spell.level, cast_level);

    let save_dc = spell_save_dc(request.ability_mod, request.proficiency_bonus);
    let attack_bonus = spell_attack_bonus(request.ability_mod, request.proficiency_bonus);

    let attack = spell
        .attack_type
        .requires_roll()
        .then(|| roll_attack(attack_bonus, rng));

    let save = spell.saving_throw.map(|st| {
        roll_saving_throw(
            st.ability,
            save_dc,
            request.target_save_bonus,
            st.on_success,
            rng,
        )
    });

    let damage_pool = scale_parsed(
        cast_formula(spell, "damage", &spell.damage),
        cast_formula(spell, "damage_per_level", &spell.damage_per_level),
        extra_levels,
    );
    let damage = DamageResult {
        formula: damage_pool.to_string(),
        min: damage_pool.min(),
        max: damage_pool.max(),
        rolled: damage_pool.roll(rng),
        damage_type: spell.damage_type,
    };

    let healing_base = cast_formula(spell, "healing", &spell.healing);
    let healing_pool = scale_parsed(
        healing_base,
        cast_formula(spell, "healing_per_level", &spell.healing_per_level),
        extra_levels,
    );
    // A bare healing formula ("1d8") gets the caster's modifier.
    let caster_modifier = match healing_base {
        Some(base) if !base.has_modifier() => request.ability_mod,
        _ => 0,
    };
    let healing = if healing_pool.is_empty() {
        HealingResult {
            formula: String::new(),
            caster_modifier: 0,
            min: 0,
            max: 0,
            rolled: 0,
        }
    } else {
        HealingResult {
            formula: healing_pool.to_string(),
            caster_modifier,
            min: healing_pool.min().saturating_add(caster_modifier),
            max: healing_pool.max().saturating_add(caster_modifier),
            rolled: healing_pool.roll(rng).saturating_add(caster_modifier),
        }
    };

    tracing::debug!(
        spell = %spell.name,
        cast_level,
        damage = damage.rolled,
        healing = healing.rolled,
        "simulated cast"
    );

    Ok(CastResult {
        spell_name: spell.name.clone(),
        spell_level: spell.level,
        cast_level,
        save_dc,
        attack_bonus,
        attack,
        save,
        damage,
        healing,
    })
}
