//! Default item catalog seeded into a fresh item store.

use super::armor::{standard_armors, ArmorCategory};
use super::types::{Item, ItemKind, ItemKindTag, Rarity};
use crate::core::constants::SHIELD_AC_BONUS;
use crate::spells::DamageType;

/// Lowercase, underscores for spaces and hyphens, alphanumerics only.
pub fn item_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Base id for an item before collision suffixes: `<kind>_<slug>`.
pub fn base_item_id(kind: ItemKindTag, name: &str) -> String {
    format!("{}_{}", kind.dir_name(), item_slug(name))
}

fn catalog_item(name: &str, rarity: Rarity, magic: bool, description: &str, kind: ItemKind) -> Item {
    let id = base_item_id(kind.tag(), name);
    Item {
        id,
        name: name.to_string(),
        rarity,
        description: description.to_string(),
        magic,
        kind,
    }
}

fn armor_details(name: &str) -> (Option<i32>, bool) {
    match name {
        "Padded" | "Scale mail" | "Half plate" | "Ring mail" => (None, true),
        "Chain mail" => (Some(13), true),
        "Splint" | "Plate" => (Some(15), true),
        _ => (None, false),
    }
}

pub fn default_armor() -> Vec<Item> {
    standard_armors()
        .into_iter()
        .filter(|a| a.category != ArmorCategory::Unarmored)
        .map(|a| {
            let (strength_required, stealth_disadvantage) = armor_details(&a.name);
            let description = format!("{} ({})", a.category.label(), a.name);
            catalog_item(
                &a.name,
                Rarity::Common,
                false,
                &description,
                ItemKind::Armor {
                    category: a.category,
                    base_ac: a.base_ac,
                    dex_cap: a.dex_cap,
                    strength_required,
                    stealth_disadvantage,
                },
            )
        })
        .collect()
}

fn weapon(name: &str, damage: &str, damage_type: DamageType, properties: &[&str]) -> Item {
    catalog_item(
        name,
        Rarity::Common,
        false,
        "",
        ItemKind::Weapon {
            damage: damage.to_string(),
            damage_type,
            range: String::new(),
            properties: properties.iter().map(|p| p.to_string()).collect(),
        },
    )
}

/// Every default item: the standard armor table, a shield, helmets, rings,
/// amulets and a handful of common weapons.
pub fn default_items() -> Vec<Item> {
    let mut items = default_armor();

    items.push(catalog_item(
        "Shield",
        Rarity::Common,
        false,
        "A wooden or metal shield carried in one hand. Wielding a shield increases your AC by 2.",
        ItemKind::Shield {
            ac_bonus: SHIELD_AC_BONUS,
        },
    ));

    items.push(catalog_item(
        "Leather helmet",
        Rarity::Common,
        false,
        "A simple cap of hardened leather.",
        ItemKind::Helmet { ac_bonus: 0 },
    ));
    items.push(catalog_item(
        "Metal helmet",
        Rarity::Common,
        false,
        "A forged metal helm.",
        ItemKind::Helmet { ac_bonus: 0 },
    ));

    items.push(catalog_item(
        "Plain ring",
        Rarity::Common,
        false,
        "A simple ring with no magical properties.",
        ItemKind::Ring {
            ac_bonus: 0,
            saving_throw_bonus: 0,
        },
    ));
    items.push(catalog_item(
        "Ring of Protection",
        Rarity::Uncommon,
        true,
        "You gain a +1 bonus to AC and saving throws while wearing this ring.",
        ItemKind::Ring {
            ac_bonus: 1,
            saving_throw_bonus: 1,
        },
    ));

    items.push(catalog_item(
        "Plain amulet",
        Rarity::Common,
        false,
        "A simple amulet with no magical properties.",
        ItemKind::Amulet {
            ac_bonus: 0,
            saving_throw_bonus: 0,
        },
    ));
    items.push(catalog_item(
        "Amulet of Health",
        Rarity::Uncommon,
        true,
        "Your Constitution score is 19 while you wear this amulet. It has no effect if your Constitution is already 19 or higher.",
        ItemKind::Amulet {
            ac_bonus: 0,
            saving_throw_bonus: 0,
        },
    ));

    items.push(weapon("Dagger", "1d4", DamageType::Piercing, &["Finesse", "Light", "Thrown"]));
    items.push(weapon("Longsword", "1d8", DamageType::Slashing, &["Versatile"]));
    items.push(weapon("Greataxe", "1d12", DamageType::Slashing, &["Heavy", "Two-handed"]));

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_item_slug() {
        assert_eq!(item_slug("Ring of Protection"), "ring_of_protection");
        assert_eq!(item_slug("Half-plate"), "half_plate");
        assert_eq!(item_slug("  Mage's Staff! "), "mages_staff");
    }

    #[test]
    fn test_default_ids_unique_and_prefixed() {
        let items = default_items();
        let ids: HashSet<_> = items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids.len(), items.len());
        for item in &items {
            assert!(item.id.starts_with(item.tag().dir_name()), "{}", item.id);
            assert!(item.validate().is_ok(), "{}", item.name);
        }
    }

    #[test]
    fn test_default_armor_matches_table() {
        let armor = default_armor();
        assert_eq!(armor.len(), 11);
        let plate = armor.iter().find(|i| i.name == "Plate").unwrap();
        assert_eq!(plate.as_armor().unwrap().base_ac, 18);
        assert!(matches!(
            plate.kind,
            ItemKind::Armor {
                strength_required: Some(15),
                stealth_disadvantage: true,
                ..
            }
        ));
    }

    #[test]
    fn test_ring_of_protection_defaults() {
        let items = default_items();
        let ring = items.iter().find(|i| i.name == "Ring of Protection").unwrap();
        assert!(ring.magic);
        assert_eq!(ring.ac_bonus(), 1);
        assert_eq!(ring.saving_throw_bonus(), 1);
    }
}
