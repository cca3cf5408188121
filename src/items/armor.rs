//! Armor class: standard armor/shield tables, AC breakdown and best-loadout search.

use crate::character::proficiencies::ArmorProficiency;
use crate::core::constants::{MEDIUM_ARMOR_DEX_CAP, SHIELD_AC_BONUS, UNARMORED_AC};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorCategory {
    Unarmored,
    Light,
    Medium,
    Heavy,
}

impl ArmorCategory {
    /// Proficiency needed to wear armor of this category without penalty.
    pub fn required_proficiency(&self) -> Option<ArmorProficiency> {
        match self {
            ArmorCategory::Unarmored => None,
            ArmorCategory::Light => Some(ArmorProficiency::Light),
            ArmorCategory::Medium => Some(ArmorProficiency::Medium),
            ArmorCategory::Heavy => Some(ArmorProficiency::Heavy),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArmorCategory::Unarmored => "No armor",
            ArmorCategory::Light => "Light armor",
            ArmorCategory::Medium => "Medium armor",
            ArmorCategory::Heavy => "Heavy armor",
        }
    }
}

impl fmt::Display for ArmorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How much of the Dexterity modifier an armor lets through.
///
/// Serialized as an optional integer: `null` is unlimited, `0` ignores Dexterity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<i32>", into = "Option<i32>")]
pub enum DexCap {
    Unlimited,
    Capped(i32),
}

impl DexCap {
    pub fn apply(&self, dex_mod: i32) -> i32 {
        match *self {
            DexCap::Unlimited => dex_mod,
            DexCap::Capped(0) => 0,
            DexCap::Capped(cap) => dex_mod.min(cap),
        }
    }
}

impl From<Option<i32>> for DexCap {
    fn from(value: Option<i32>) -> Self {
        match value {
            None => DexCap::Unlimited,
            Some(cap) => DexCap::Capped(cap.max(0)),
        }
    }
}

impl From<DexCap> for Option<i32> {
    fn from(cap: DexCap) -> Self {
        match cap {
            DexCap::Unlimited => None,
            DexCap::Capped(c) => Some(c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorDefinition {
    pub name: String,
    pub category: ArmorCategory,
    pub base_ac: i32,
    pub dex_cap: DexCap,
}

impl ArmorDefinition {
    pub fn new(name: &str, category: ArmorCategory, base_ac: i32, dex_cap: DexCap) -> Self {
        Self {
            name: name.to_string(),
            category,
            base_ac,
            dex_cap,
        }
    }

    pub fn unarmored() -> Self {
        Self::new("Unarmored", ArmorCategory::Unarmored, UNARMORED_AC, DexCap::Unlimited)
    }

    pub fn required_proficiency(&self) -> Option<ArmorProficiency> {
        self.category.required_proficiency()
    }

    pub fn is_wearable_with(&self, proficiencies: &BTreeSet<ArmorProficiency>) -> bool {
        self.required_proficiency()
            .map_or(true, |p| proficiencies.contains(&p))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldDefinition {
    pub name: String,
    pub ac_bonus: i32,
    pub requires_proficiency: bool,
}

impl ShieldDefinition {
    pub fn none() -> Self {
        Self {
            name: "No shield".to_string(),
            ac_bonus: 0,
            requires_proficiency: false,
        }
    }

    pub fn standard() -> Self {
        Self {
            name: "Shield".to_string(),
            ac_bonus: SHIELD_AC_BONUS,
            requires_proficiency: true,
        }
    }

    pub fn is_usable_with(&self, proficiencies: &BTreeSet<ArmorProficiency>) -> bool {
        !self.requires_proficiency || proficiencies.contains(&ArmorProficiency::Shield)
    }
}

/// The standard armor table, declared from the lowest proficiency tier upward.
///
/// Declaration order is also the optimizer's tie-break order.
pub fn standard_armors() -> Vec<ArmorDefinition> {
    use ArmorCategory::*;
    let medium = DexCap::Capped(MEDIUM_ARMOR_DEX_CAP);
    let heavy = DexCap::Capped(0);
    vec![
        ArmorDefinition::unarmored(),
        ArmorDefinition::new("Padded", Light, 11, DexCap::Unlimited),
        ArmorDefinition::new("Leather", Light, 11, DexCap::Unlimited),
        ArmorDefinition::new("Studded leather", Light, 12, DexCap::Unlimited),
        ArmorDefinition::new("Chain shirt", Medium, 13, medium),
        ArmorDefinition::new("Scale mail", Medium, 14, medium),
        ArmorDefinition::new("Breastplate", Medium, 14, medium),
        ArmorDefinition::new("Half plate", Medium, 15, medium),
        ArmorDefinition::new("Ring mail", Heavy, 14, heavy),
        ArmorDefinition::new("Chain mail", Heavy, 16, heavy),
        ArmorDefinition::new("Splint", Heavy, 17, heavy),
        ArmorDefinition::new("Plate", Heavy, 18, heavy),
    ]
}

/// Shield options, unshielded first.
pub fn standard_shields() -> Vec<ShieldDefinition> {
    vec![ShieldDefinition::none(), ShieldDefinition::standard()]
}

/// Case-insensitive lookup in the standard armor table.
pub fn find_armor(name: &str) -> Option<ArmorDefinition> {
    standard_armors()
        .into_iter()
        .find(|a| a.name.eq_ignore_ascii_case(name.trim()))
}

/// Every term that went into an armor class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcBreakdown {
    pub armor: String,
    pub category: ArmorCategory,
    pub base: i32,
    pub dex_mod: i32,
    pub applied_dex: i32,
    pub shield: Option<String>,
    pub shield_bonus: i32,
    pub extra_bonus: i32,
    /// Armor base plus applied Dexterity.
    pub base_total: i32,
    pub total: i32,
}

pub fn calculate_ac(
    armor: &ArmorDefinition,
    dex_mod: i32,
    shield: Option<&ShieldDefinition>,
    extra_bonus: i32,
) -> AcBreakdown {
    let applied_dex = armor.dex_cap.apply(dex_mod);
    let base_total = armor.base_ac + applied_dex;
    let shield_bonus = shield.map_or(0, |s| s.ac_bonus);

    AcBreakdown {
        armor: armor.name.clone(),
        category: armor.category,
        base: armor.base_ac,
        dex_mod,
        applied_dex,
        shield: shield.filter(|s| s.ac_bonus != 0).map(|s| s.name.clone()),
        shield_bonus,
        extra_bonus,
        base_total,
        total: base_total + shield_bonus + extra_bonus,
    }
}

/// An armor + shield combination and the AC it yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub armor: ArmorDefinition,
    pub shield: ShieldDefinition,
    pub total_ac: i32,
}

impl Loadout {
    /// No armor, no shield: `10 + dex_mod`.
    pub fn floor(dex_mod: i32) -> Self {
        Self {
            armor: ArmorDefinition::unarmored(),
            shield: ShieldDefinition::none(),
            total_ac: UNARMORED_AC + dex_mod,
        }
    }

    pub fn has_shield(&self) -> bool {
        self.shield.ac_bonus != 0
    }
}

/// Best loadout from the standard tables.
pub fn best_loadout(dex_mod: i32, proficiencies: &BTreeSet<ArmorProficiency>) -> Loadout {
    best_loadout_from(&standard_armors(), &standard_shields(), dex_mod, proficiencies)
}

/// Exhaustive armor × shield search.
///
/// Combinations needing a missing proficiency are skipped. On equal AC the
/// combination enumerated first wins (armor table order, then shield order).
pub fn best_loadout_from(
    armors: &[ArmorDefinition],
    shields: &[ShieldDefinition],
    dex_mod: i32,
    proficiencies: &BTreeSet<ArmorProficiency>,
) -> Loadout {
    let mut best = Loadout::floor(dex_mod);

    for armor in armors.iter().filter(|a| a.is_wearable_with(proficiencies)) {
        for shield in shields.iter().filter(|s| s.is_usable_with(proficiencies)) {
            let total = calculate_ac(armor, dex_mod, Some(shield), 0).total;
            if total > best.total_ac {
                best = Loadout {
                    armor: armor.clone(),
                    shield: shield.clone(),
                    total_ac: total,
                };
            }
        }
    }

    tracing::debug!(
        armor = %best.armor.name,
        shield = %best.shield.name,
        total_ac = best.total_ac,
        dex_mod,
        "selected loadout"
    );
    best
}

/// A recommended loadout with a readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutSuggestion {
    pub loadout: Loadout,
    pub explanation: String,
    pub tips: Vec<String>,
}

pub fn suggest_loadout(
    dex_mod: i32,
    proficiencies: &BTreeSet<ArmorProficiency>,
) -> LoadoutSuggestion {
    let loadout = best_loadout(dex_mod, proficiencies);

    let mut explanation = format!("To maximize your AC, wear {}", loadout.armor.name);
    if loadout.has_shield() {
        explanation.push_str(&format!(" with a {}", loadout.shield.name));
    }
    explanation.push_str(&format!(
        ". With a Dexterity modifier of {dex_mod:+}, you reach a total AC of {}.",
        loadout.total_ac
    ));

    let mut tips = Vec::new();
    if dex_mod > 2 && proficiencies.contains(&ArmorProficiency::Light) {
        tips.push(
            "With your high Dexterity modifier, light armor outperforms medium or heavy armor."
                .to_string(),
        );
    } else if dex_mod <= 0 && proficiencies.contains(&ArmorProficiency::Heavy) {
        tips.push("With your low Dexterity modifier, heavy armor is the best option.".to_string());
    }

    LoadoutSuggestion {
        loadout,
        explanation,
        tips,
    }
}
