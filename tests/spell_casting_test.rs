//! Integration test: spell casting simulation
//!
//! Drives `simulate_cast` with the sample spells: attack rolls, saving throws,
//! upcast damage and healing, and the cast-level checks.

use dnd_keeper::character::{Ability, Character, CharacterClass, Race};
use dnd_keeper::combat::{simulate_cast, CastRequest};
use dnd_keeper::error::RulesError;
use dnd_keeper::spells::{sample_spells, DamageType, SaveEffect, Spell};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn sample(name: &str) -> Spell {
    sample_spells()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap()
}

// =========================================================================
// Saving throw spells
// =========================================================================

#[test]
fn test_fireball_at_base_level() {
    let mut rng = create_test_rng();
    let request = CastRequest::new(3, 2);
    let result = simulate_cast(&sample("Fireball"), &request, &mut rng).unwrap();

    assert_eq!(result.cast_level, 3);
    assert!(!result.is_upcast());
    assert_eq!(result.save_dc, 13);
    assert!(result.attack.is_none());

    let save = result.save.unwrap();
    assert_eq!(save.ability, Ability::Dexterity);
    assert_eq!(save.dc, 13);
    assert_eq!(save.bonus, 2);
    assert_eq!(save.success, save.total >= 13);
    assert_eq!(save.effect, SaveEffect::HalfDamage);

    assert_eq!(result.damage.formula, "8d6");
    assert_eq!(result.damage.min, 8);
    assert_eq!(result.damage.max, 48);
    assert!((8..=48).contains(&result.damage.rolled));
    assert_eq!(result.damage.damage_type, Some(DamageType::Fire));
}

#[test]
fn test_fireball_upcast_adds_dice() {
    let mut rng = create_test_rng();
    let request = CastRequest::new(3, 2).at_level(5);
    let result = simulate_cast(&sample("Fireball"), &request, &mut rng).unwrap();

    assert!(result.is_upcast());
    assert_eq!(result.damage.formula, "8d6 + 1d6 + 1d6");
    assert_eq!(result.damage.min, 10);
    assert_eq!(result.damage.max, 60);
}

#[test]
fn test_target_save_bonus_is_used() {
    let mut rng = create_test_rng();
    let request = CastRequest::new(3, 2).with_target_save_bonus(-5);
    let result = simulate_cast(&sample("Holy Word"), &request, &mut rng).unwrap();

    let save = result.save.unwrap();
    assert_eq!(save.ability, Ability::Charisma);
    assert_eq!(save.bonus, -5);
    assert_eq!(save.total, save.d20 as i32 - 5);
    assert!(result.damage.formula.is_empty());
    assert_eq!(result.damage.rolled, 0);
}

// =========================================================================
// Attack roll spells
// =========================================================================

#[test]
fn test_ray_of_frost_rolls_attack() {
    let mut rng = create_test_rng();
    for _ in 0..50 {
        let result = simulate_cast(&sample("Ray of Frost"), &CastRequest::new(4, 3), &mut rng)
            .unwrap();
        let attack = result.attack.unwrap();
        assert_eq!(attack.bonus, 7);
        assert_eq!(attack.total, attack.d20 as i32 + 7);
        assert_eq!(attack.critical, attack.d20 == 20);
        assert_eq!(attack.fumble, attack.d20 == 1);
        assert!(result.save.is_none());
        assert!((1..=8).contains(&result.damage.rolled));
    }
}

#[test]
fn test_utility_cantrip_rolls_nothing() {
    let mut rng = create_test_rng();
    let result = simulate_cast(&sample("Mage Hand"), &CastRequest::new(2, 2), &mut rng).unwrap();
    assert!(result.attack.is_none());
    assert!(result.save.is_none());
    assert_eq!(result.damage.rolled, 0);
    assert_eq!(result.healing.rolled, 0);
}

// =========================================================================
// Healing
// =========================================================================

#[test]
fn test_explicit_healing_modifier_is_not_doubled() {
    let mut rng = create_test_rng();
    let result =
        simulate_cast(&sample("Cure Wounds"), &CastRequest::new(3, 2), &mut rng).unwrap();
    assert_eq!(result.healing.caster_modifier, 0);
    assert_eq!(result.healing.min, 5);
    assert_eq!(result.healing.max, 12);
}

#[test]
fn test_bare_healing_formula_adds_caster_modifier_once() {
    let mut rng = create_test_rng();
    let request = CastRequest::new(4, 3).at_level(6);
    let result = simulate_cast(&sample("Mass Cure Wounds"), &request, &mut rng).unwrap();

    assert_eq!(result.healing.formula, "3d8 + 1d8");
    assert_eq!(result.healing.caster_modifier, 4);
    assert_eq!(result.healing.min, 4 + 4);
    assert_eq!(result.healing.max, 32 + 4);
    assert!((8..=36).contains(&result.healing.rolled));
}

#[test]
fn test_hand_edited_bad_formula_still_casts() {
    let mut rng = create_test_rng();
    let broken = Spell {
        damage: "8x6".to_string(),
        ..sample("Fireball")
    };
    let result = simulate_cast(&broken, &CastRequest::new(3, 2), &mut rng).unwrap();
    assert_eq!(result.damage.rolled, 0);
    assert!(result.damage.formula.is_empty());
    assert!(result.save.is_some());
}

// =========================================================================
// Cast level checks
// =========================================================================

#[test]
fn test_cast_below_spell_level_is_rejected() {
    let mut rng = create_test_rng();
    let request = CastRequest::new(3, 2).at_level(2);
    assert!(matches!(
        simulate_cast(&sample("Fireball"), &request, &mut rng),
        Err(RulesError::CastLevelTooLow {
            spell_level: 3,
            cast_level: 2
        })
    ));
}

#[test]
fn test_cast_above_nine_is_rejected() {
    let mut rng = create_test_rng();
    let request = CastRequest::new(3, 2).at_level(10);
    assert!(simulate_cast(&sample("Magic Missile"), &request, &mut rng).is_err());
}

#[test]
fn test_seeded_casts_replay_exactly() {
    let spell = sample("Fireball");
    let request = CastRequest::new(3, 2).at_level(4);
    let a = simulate_cast(&spell, &request, &mut create_test_rng()).unwrap();
    let b = simulate_cast(&spell, &request, &mut create_test_rng()).unwrap();
    assert_eq!(a, b);
}

// =========================================================================
// Casting from a character sheet
// =========================================================================

#[test]
fn test_character_cast_request() {
    let mut wizard = Character::new("Elminster", CharacterClass::Wizard, Race::Human);
    wizard.abilities.set(Ability::Intelligence, 18).unwrap();
    wizard.set_level(5).unwrap();

    let request = wizard.cast_request();
    assert_eq!(request.ability_mod, 4);
    assert_eq!(request.proficiency_bonus, 3);
    assert_eq!(wizard.max_spell_level(), Some(3));

    let derived = wizard.derived();
    assert_eq!(derived.spell_save_dc, Some(15));
    assert_eq!(derived.spell_attack_bonus, Some(7));
}

#[test]
fn test_non_caster_has_no_spell_slots() {
    let fighter = Character::new("Bruenor", CharacterClass::Fighter, Race::Dwarf);
    assert_eq!(fighter.max_spell_level(), None);
}
