//! Integration test: armor class and loadout search
//!
//! Covers the proficiency-gated optimizer, Dexterity caps per armor category,
//! suggestion text, and AC computed from a character's equipped items.

use dnd_keeper::character::{
    parse_armor_proficiencies, Ability, ArmorProficiency, Character, CharacterClass, Race,
};
use dnd_keeper::items::{
    best_loadout, calculate_ac, default_items, find_armor, suggest_loadout, ArmorCategory,
    Equipment, EquipmentSlot, ShieldDefinition,
};
use std::collections::BTreeSet;

fn profs(labels: &[&str]) -> BTreeSet<ArmorProficiency> {
    parse_armor_proficiencies(labels).unwrap()
}

// =========================================================================
// Optimizer
// =========================================================================

#[test]
fn test_heavy_wins_at_dex_two() {
    let loadout = best_loadout(2, &profs(&["light", "medium", "heavy"]));
    assert_eq!(loadout.armor.name, "Plate");
    assert_eq!(loadout.armor.category, ArmorCategory::Heavy);
    assert_eq!(loadout.total_ac, 18);
    assert!(!loadout.has_shield());
}

#[test]
fn test_shield_adds_two_when_proficient() {
    let loadout = best_loadout(2, &profs(&["light", "medium", "heavy", "shield"]));
    assert_eq!(loadout.armor.name, "Plate");
    assert!(loadout.has_shield());
    assert_eq!(loadout.total_ac, 20);
}

#[test]
fn test_no_proficiencies_falls_back_to_unarmored() {
    for dex in -2..=5 {
        let loadout = best_loadout(dex, &BTreeSet::new());
        assert_eq!(loadout.armor.category, ArmorCategory::Unarmored);
        assert_eq!(loadout.total_ac, 10 + dex);
    }
}

#[test]
fn test_light_and_medium_tie_resolves_to_light() {
    // Studded leather 12+5 and half plate 15+2 both reach 17.
    let loadout = best_loadout(5, &profs(&["light", "medium"]));
    assert_eq!(loadout.armor.name, "Studded leather");
    assert_eq!(loadout.total_ac, 17);
}

#[test]
fn test_medium_only_picks_half_plate() {
    let medium_only = profs(&["medium"]);
    let loadout = best_loadout(-1, &medium_only);
    assert_eq!(loadout.armor.name, "Half plate");
    assert_eq!(loadout.total_ac, 14);
}

#[test]
fn test_find_armor_ignores_case() {
    let scale = find_armor("  scale MAIL ").unwrap();
    assert_eq!(scale.name, "Scale mail");
    assert!(find_armor("Mithral shirt").is_none());
}

// =========================================================================
// Dexterity caps
// =========================================================================

#[test]
fn test_medium_caps_dex_at_two() {
    let half_plate = find_armor("Half plate").unwrap();
    let ac = calculate_ac(&half_plate, 4, None, 0);
    assert_eq!(ac.applied_dex, 2);
    assert_eq!(ac.total, 17);
}

#[test]
fn test_heavy_ignores_negative_dex() {
    let chain = find_armor("Chain mail").unwrap();
    assert_eq!(calculate_ac(&chain, -3, None, 0).total, 16);
}

#[test]
fn test_medium_passes_negative_dex_through() {
    let chain_shirt = find_armor("Chain shirt").unwrap();
    assert_eq!(calculate_ac(&chain_shirt, -1, None, 0).total, 12);
}

#[test]
fn test_breakdown_sums_every_term() {
    let leather = find_armor("Leather").unwrap();
    let shield = ShieldDefinition::standard();
    let ac = calculate_ac(&leather, 3, Some(&shield), 1);
    assert_eq!(ac.base_total, 14);
    assert_eq!(ac.shield_bonus, 2);
    assert_eq!(ac.extra_bonus, 1);
    assert_eq!(ac.total, 17);
    assert_eq!(ac.shield.as_deref(), Some("Shield"));
}

// =========================================================================
// Suggestions
// =========================================================================

#[test]
fn test_suggestion_mentions_armor_and_total() {
    let suggestion = suggest_loadout(2, &profs(&["light", "medium", "heavy", "shield"]));
    assert!(suggestion.explanation.contains("Plate"));
    assert!(suggestion.explanation.contains("Shield"));
    assert!(suggestion.explanation.contains("20"));
    assert!(suggestion.tips.is_empty());
}

#[test]
fn test_suggestion_tips_follow_dexterity() {
    let nimble = suggest_loadout(4, &profs(&["light"]));
    assert_eq!(nimble.tips.len(), 1);
    assert!(nimble.tips[0].contains("light armor"));

    let clumsy = suggest_loadout(-1, &profs(&["heavy"]));
    assert_eq!(clumsy.tips.len(), 1);
    assert!(clumsy.tips[0].contains("heavy armor"));
}

#[test]
fn test_character_loadout_uses_own_dexterity() {
    let mut paladin = Character::new("Lyra", CharacterClass::Paladin, Race::Human);
    paladin.abilities.set(Ability::Dexterity, 8).unwrap();
    paladin.armor_proficiencies = profs(&["light", "medium", "heavy", "shield"]);

    let loadout = paladin.best_loadout();
    assert_eq!(loadout.armor.name, "Plate");
    assert_eq!(loadout.total_ac, 20);
}

// =========================================================================
// Equipped items
// =========================================================================

#[test]
fn test_equipped_catalog_items_stack() {
    let catalog = default_items();
    let pick = |id: &str| catalog.iter().find(|i| i.id == id).cloned().unwrap();

    let mut equipment = Equipment::new();
    equipment.set(EquipmentSlot::Armor, Some(pick("armor_half_plate")));
    equipment.set(EquipmentSlot::Shield, Some(pick("shield_shield")));
    let ac = equipment.armor_class(2);
    assert_eq!(ac.total, 15 + 2 + 2);

    equipment.set(EquipmentSlot::Ring, Some(pick("ring_ring_of_protection")));
    assert_eq!(equipment.armor_class(2).total, 20);
}

#[test]
fn test_empty_equipment_is_unarmored() {
    let equipment = Equipment::new();
    assert_eq!(equipment.armor_class(3).total, 13);
}
