//! Spellcasting math: save DC, spell attack bonus and upcast scaling.

use crate::core::constants::{MAX_SPELL_LEVEL, SPELL_SAVE_DC_BASE};
use crate::dice::{DiceFormula, DicePool};
use crate::error::{DiceError, RulesError};

/// `8 + ability modifier + proficiency bonus`.
pub fn spell_save_dc(ability_mod: i32, proficiency_bonus: i32) -> i32 {
    SPELL_SAVE_DC_BASE + ability_mod + proficiency_bonus
}

pub fn spell_attack_bonus(ability_mod: i32, proficiency_bonus: i32) -> i32 {
    ability_mod + proficiency_bonus
}

pub fn levels_above_base(spell_level: u8, cast_level: u8) -> u8 {
    cast_level.saturating_sub(spell_level)
}

/// Highest spell level a full caster of `character_level` can cast.
pub fn max_spell_level_for_character(character_level: u8) -> u8 {
    (character_level / 2 + 1).min(MAX_SPELL_LEVEL)
}

/// Checks that a spell of `spell_level` can be cast at `cast_level`.
pub fn validate_cast_level(spell_level: u8, cast_level: u8) -> Result<(), RulesError> {
    if spell_level > MAX_SPELL_LEVEL {
        return Err(RulesError::SpellLevelOutOfRange(spell_level as i32));
    }
    if cast_level > MAX_SPELL_LEVEL {
        return Err(RulesError::SpellLevelOutOfRange(cast_level as i32));
    }
    if cast_level < spell_level {
        return Err(RulesError::CastLevelTooLow {
            spell_level,
            cast_level,
        });
    }
    Ok(())
}

/// The base formula plus one independent copy of `extra_per_level` per level above base.
///
/// A blank base yields an empty pool: per-level extras only scale something that exists.
pub fn scale_formula_by_levels(
    base: &str,
    extra_per_level: &str,
    levels_above_base: u8,
) -> Result<DicePool, DiceError> {
    Ok(scale_parsed(
        DiceFormula::parse(base)?,
        DiceFormula::parse(extra_per_level)?,
        levels_above_base,
    ))
}

/// [`scale_formula_by_levels`] over already parsed formulas.
pub fn scale_parsed(
    base: Option<DiceFormula>,
    extra_per_level: Option<DiceFormula>,
    levels_above_base: u8,
) -> DicePool {
    let mut pool = DicePool::new();
    let Some(base) = base else {
        return pool;
    };
    pool.push(base);

    if let Some(extra) = extra_per_level {
        pool.push_repeated(extra, levels_above_base as u32);
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::evaluate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_dc_and_attack_bonus() {
        assert_eq!(spell_save_dc(3, 2), 13);
        assert_eq!(spell_attack_bonus(3, 2), 5);
        assert_eq!(spell_save_dc(-1, 2), 9);
    }

    #[test]
    fn test_levels_above_base_never_negative() {
        assert_eq!(levels_above_base(3, 5), 2);
        assert_eq!(levels_above_base(3, 3), 0);
        assert_eq!(levels_above_base(5, 3), 0);
    }

    #[test]
    fn test_max_spell_level_for_character() {
        assert_eq!(max_spell_level_for_character(1), 1);
        assert_eq!(max_spell_level_for_character(5), 3);
        assert_eq!(max_spell_level_for_character(16), 9);
        assert_eq!(max_spell_level_for_character(20), 9);
    }

    #[test]
    fn test_validate_cast_level() {
        assert!(validate_cast_level(3, 5).is_ok());
        assert!(validate_cast_level(0, 0).is_ok());
        assert_eq!(
            validate_cast_level(3, 2),
            Err(RulesError::CastLevelTooLow {
                spell_level: 3,
                cast_level: 2
            })
        );
        assert_eq!(
            validate_cast_level(3, 10),
            Err(RulesError::SpellLevelOutOfRange(10))
        );
    }

    #[test]
    fn test_fireball_upcast_pool() {
        let pool = scale_formula_by_levels("8d6", "1d6", 2).unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.min(), 10);
        assert_eq!(pool.max(), 60);

        // The extra part matches two separate 1d6 evaluations summed.
        let mut rng = create_test_rng();
        let one = evaluate("1d6", 0, &mut rng);
        let extras: Vec<_> = pool.members()[1..].to_vec();
        assert_eq!(extras.iter().map(|f| f.min()).sum::<i32>(), one.min * 2);
        assert_eq!(extras.iter().map(|f| f.max()).sum::<i32>(), one.max * 2);
    }

    #[test]
    fn test_modifiers_repeat_per_level() {
        // Magic missile style: each extra dart keeps its own +1.
        let pool = scale_formula_by_levels("1d4+1", "1d4+1", 2).unwrap();
        assert_eq!(pool.min(), 6);
        assert_eq!(pool.max(), 15);
    }

    #[test]
    fn test_empty_base_means_no_extras() {
        let pool = scale_formula_by_levels("", "1d6", 4).unwrap();
        assert!(pool.is_empty());
        assert_eq!(pool.max(), 0);
    }

    #[test]
    fn test_empty_extra_keeps_base() {
        let pool = scale_formula_by_levels("1d8", "", 3).unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_malformed_formula_is_error() {
        assert!(scale_formula_by_levels("8x6", "1d6", 1).is_err());
        assert!(scale_formula_by_levels("8d6", "1d3", 1).is_err());
    }
}
