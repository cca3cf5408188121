use super::armor::{ArmorCategory, ArmorDefinition, DexCap, ShieldDefinition};
use crate::dice::DiceFormula;
use crate::error::ValidationError;
use crate::spells::DamageType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Shield,
    Helmet,
    Ring,
    Amulet,
    Accessory,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 7] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Shield,
            EquipmentSlot::Helmet,
            EquipmentSlot::Ring,
            EquipmentSlot::Amulet,
            EquipmentSlot::Accessory,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    #[serde(rename = "Very Rare", alias = "VeryRare")]
    VeryRare,
    Legendary,
    Artifact,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::VeryRare => "Very Rare",
            Rarity::Legendary => "Legendary",
            Rarity::Artifact => "Artifact",
        }
    }
}

/// Item category without its properties. Doubles as the catalog directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKindTag {
    Armor,
    Weapon,
    Helmet,
    Shield,
    Ring,
    Amulet,
    Accessory,
    Consumable,
}

impl ItemKindTag {
    pub fn all() -> [ItemKindTag; 8] {
        [
            ItemKindTag::Armor,
            ItemKindTag::Weapon,
            ItemKindTag::Helmet,
            ItemKindTag::Shield,
            ItemKindTag::Ring,
            ItemKindTag::Amulet,
            ItemKindTag::Accessory,
            ItemKindTag::Consumable,
        ]
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            ItemKindTag::Armor => "armor",
            ItemKindTag::Weapon => "weapon",
            ItemKindTag::Helmet => "helmet",
            ItemKindTag::Shield => "shield",
            ItemKindTag::Ring => "ring",
            ItemKindTag::Amulet => "amulet",
            ItemKindTag::Accessory => "accessory",
            ItemKindTag::Consumable => "consumable",
        }
    }

    /// Slot an item of this kind occupies, if it can be equipped.
    pub fn slot(&self) -> Option<EquipmentSlot> {
        match self {
            ItemKindTag::Armor => Some(EquipmentSlot::Armor),
            ItemKindTag::Weapon => Some(EquipmentSlot::Weapon),
            ItemKindTag::Helmet => Some(EquipmentSlot::Helmet),
            ItemKindTag::Shield => Some(EquipmentSlot::Shield),
            ItemKindTag::Ring => Some(EquipmentSlot::Ring),
            ItemKindTag::Amulet => Some(EquipmentSlot::Amulet),
            ItemKindTag::Accessory => Some(EquipmentSlot::Accessory),
            ItemKindTag::Consumable => None,
        }
    }
}

impl fmt::Display for ItemKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Kind-specific properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Armor {
        category: ArmorCategory,
        base_ac: i32,
        #[serde(default = "unlimited_dex")]
        dex_cap: DexCap,
        #[serde(default)]
        strength_required: Option<i32>,
        #[serde(default)]
        stealth_disadvantage: bool,
    },
    Weapon {
        damage: String,
        damage_type: DamageType,
        #[serde(default)]
        range: String,
        #[serde(default)]
        properties: Vec<String>,
    },
    Helmet {
        #[serde(default)]
        ac_bonus: i32,
    },
    Shield {
        ac_bonus: i32,
    },
    Ring {
        #[serde(default)]
        ac_bonus: i32,
        #[serde(default)]
        saving_throw_bonus: i32,
    },
    Amulet {
        #[serde(default)]
        ac_bonus: i32,
        #[serde(default)]
        saving_throw_bonus: i32,
    },
    Accessory {
        #[serde(default)]
        ac_bonus: i32,
    },
    Consumable {
        effect: String,
        #[serde(default)]
        duration: String,
        #[serde(default = "single_use")]
        uses: u32,
    },
}

fn unlimited_dex() -> DexCap {
    DexCap::Unlimited
}

fn single_use() -> u32 {
    1
}

impl ItemKind {
    pub fn tag(&self) -> ItemKindTag {
        match self {
            ItemKind::Armor { .. } => ItemKindTag::Armor,
            ItemKind::Weapon { .. } => ItemKindTag::Weapon,
            ItemKind::Helmet { .. } => ItemKindTag::Helmet,
            ItemKind::Shield { .. } => ItemKindTag::Shield,
            ItemKind::Ring { .. } => ItemKindTag::Ring,
            ItemKind::Amulet { .. } => ItemKindTag::Amulet,
            ItemKind::Accessory { .. } => ItemKindTag::Accessory,
            ItemKind::Consumable { .. } => ItemKindTag::Consumable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub magic: bool,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(id: &str, name: &str, kind: ItemKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            rarity: Rarity::Common,
            description: String::new(),
            magic: false,
            kind,
        }
    }

    pub fn tag(&self) -> ItemKindTag {
        self.kind.tag()
    }

    /// AC this item adds on top of worn armor. Armor itself sets the base instead.
    pub fn ac_bonus(&self) -> i32 {
        match self.kind {
            ItemKind::Helmet { ac_bonus }
            | ItemKind::Shield { ac_bonus }
            | ItemKind::Ring { ac_bonus, .. }
            | ItemKind::Amulet { ac_bonus, .. }
            | ItemKind::Accessory { ac_bonus } => ac_bonus,
            _ => 0,
        }
    }

    pub fn saving_throw_bonus(&self) -> i32 {
        match self.kind {
            ItemKind::Ring {
                saving_throw_bonus, ..
            }
            | ItemKind::Amulet {
                saving_throw_bonus, ..
            } => saving_throw_bonus,
            _ => 0,
        }
    }

    pub fn as_armor(&self) -> Option<ArmorDefinition> {
        match self.kind {
            ItemKind::Armor {
                category,
                base_ac,
                dex_cap,
                ..
            } => Some(ArmorDefinition::new(&self.name, category, base_ac, dex_cap)),
            _ => None,
        }
    }

    pub fn as_shield(&self) -> Option<ShieldDefinition> {
        match self.kind {
            ItemKind::Shield { ac_bonus } => Some(ShieldDefinition {
                name: self.name.clone(),
                ac_bonus,
                requires_proficiency: true,
            }),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName("item"));
        }
        if let ItemKind::Weapon { damage, .. } = &self.kind {
            DiceFormula::parse(damage).map_err(|source| ValidationError::Formula {
                field: "damage",
                source,
            })?;
        }
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.tag(), self.rarity.name())?;
        match &self.kind {
            ItemKind::Armor { base_ac, .. } => write!(f, " - AC: {base_ac}"),
            ItemKind::Weapon {
                damage,
                damage_type,
                ..
            } => write!(f, " - {damage} {damage_type}"),
            _ if self.ac_bonus() != 0 => write!(f, " - AC: {:+}", self.ac_bonus()),
            _ => Ok(()),
        }
    }
}
