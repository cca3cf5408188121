//! Sample spells seeded into an empty spell book.

use super::types::{AttackType, DamageType, SaveEffect, SavingThrow, School, Spell};
use crate::character::attributes::Ability;
use crate::character::classes::CharacterClass::{self, *};

fn spell(name: &str, level: u8, school: School, classes: &[CharacterClass]) -> Spell {
    Spell::new(name, level, school, classes)
}

pub fn sample_spells() -> Vec<Spell> {
    vec![
        Spell {
            casting_time: "1 bonus action".to_string(),
            range: "30 feet".to_string(),
            components: "V".to_string(),
            saving_throw: Some(SavingThrow {
                ability: Ability::Charisma,
                on_success: SaveEffect::NoDamage,
            }),
            description: "You speak a word of divine power. Each creature of your choice that can hear you within range must make a Charisma saving throw. On a failed save, a creature suffers an effect based on its current hit points.".to_string(),
            ..spell("Holy Word", 7, School::Evocation, &[Cleric])
        },
        Spell {
            range: "150 feet".to_string(),
            components: "V, S, M (a tiny ball of bat guano and sulfur)".to_string(),
            saving_throw: Some(SavingThrow {
                ability: Ability::Dexterity,
                on_success: SaveEffect::HalfDamage,
            }),
            damage: "8d6".to_string(),
            damage_type: Some(DamageType::Fire),
            damage_per_level: "1d6".to_string(),
            description: "A bright streak flashes to a point you choose within range and blossoms into an explosion of flame. Each creature in a 20-foot-radius sphere must make a Dexterity saving throw, taking 8d6 fire damage on a failed save or half as much on a success.".to_string(),
            ..spell("Fireball", 3, School::Evocation, &[Wizard, Sorcerer])
        },
        Spell {
            range: "Touch".to_string(),
            components: "V, S".to_string(),
            healing: "1d8+4".to_string(),
            healing_per_level: "1d8".to_string(),
            description: "A creature you touch regains hit points. This spell has no effect on undead or constructs.".to_string(),
            ..spell("Cure Wounds", 1, School::Evocation, &[Bard, Cleric, Druid, Paladin, Ranger])
        },
        Spell {
            range: "120 feet".to_string(),
            components: "V, S".to_string(),
            damage: "1d4+1".to_string(),
            damage_type: Some(DamageType::Force),
            damage_per_level: "1d4+1".to_string(),
            description: "You create three glowing darts of magical force. Each dart hits a creature of your choice that you can see within range.".to_string(),
            ..spell("Magic Missile", 1, School::Evocation, &[Wizard, Sorcerer])
        },
        Spell {
            range: "60 feet".to_string(),
            components: "V, S".to_string(),
            attack_type: AttackType::Ranged,
            damage: "1d8".to_string(),
            damage_type: Some(DamageType::Cold),
            description: "A frigid beam of blue-white light streaks toward a creature within range. On a hit it takes 1d8 cold damage and its speed is reduced by 10 feet until the start of your next turn.".to_string(),
            ..spell("Ray of Frost", 0, School::Evocation, &[Wizard, Sorcerer])
        },
        Spell {
            range: "30 feet".to_string(),
            components: "V, S".to_string(),
            duration: "1 minute".to_string(),
            description: "A spectral, floating hand appears at a point you choose within range. You can use your action to control the hand.".to_string(),
            ..spell("Mage Hand", 0, School::Conjuration, &[Bard, Sorcerer, Warlock, Wizard])
        },
        Spell {
            casting_time: "1 reaction".to_string(),
            range: "Self".to_string(),
            components: "V, S".to_string(),
            duration: "1 round".to_string(),
            description: "An invisible barrier of magical force protects you. Until the start of your next turn, you have a +5 bonus to AC.".to_string(),
            ..spell("Shield", 1, School::Abjuration, &[Sorcerer, Wizard])
        },
        Spell {
            range: "60 feet".to_string(),
            components: "V, S".to_string(),
            healing: "3d8".to_string(),
            healing_per_level: "1d8".to_string(),
            description: "A wave of healing energy washes out from a point of your choice within range. Choose up to six creatures in a 30-foot-radius sphere; each regains hit points.".to_string(),
            ..spell("Mass Cure Wounds", 5, School::Evocation, &[Bard, Cleric, Druid])
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_validate() {
        for spell in sample_spells() {
            assert!(spell.validate().is_ok(), "{} should validate", spell.name);
        }
    }

    #[test]
    fn test_samples_cover_cantrips_and_high_levels() {
        let samples = sample_spells();
        assert!(samples.iter().any(|s| s.is_cantrip()));
        assert!(samples.iter().any(|s| s.level >= 7));
    }
}
