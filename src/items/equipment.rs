use super::armor::{calculate_ac, AcBreakdown, ArmorDefinition};
use super::types::{EquipmentSlot, Item};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Items worn by a character, one per slot.
///
/// Characters persist only item ids per slot; this is the resolved view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<Item>,
    #[serde(default)]
    pub armor: Option<Item>,
    #[serde(default)]
    pub shield: Option<Item>,
    #[serde(default)]
    pub helmet: Option<Item>,
    #[serde(default)]
    pub ring: Option<Item>,
    #[serde(default)]
    pub amulet: Option<Item>,
    #[serde(default)]
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Shield => &self.shield,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Ring => &self.ring,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Accessory => &self.accessory,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Armor => self.armor = item,
            EquipmentSlot::Shield => self.shield = item,
            EquipmentSlot::Helmet => self.helmet = item,
            EquipmentSlot::Ring => self.ring = item,
            EquipmentSlot::Amulet => self.amulet = item,
            EquipmentSlot::Accessory => self.accessory = item,
        }
    }

    /// Puts `item` in the slot its kind occupies and returns what was there.
    ///
    /// Items without a slot (consumables) are handed back as `Err`.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, Item> {
        let Some(slot) = item.tag().slot() else {
            return Err(item);
        };
        let previous = self.get(slot).clone();
        self.set(slot, Some(item));
        Ok(previous)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.weapon,
            &self.armor,
            &self.shield,
            &self.helmet,
            &self.ring,
            &self.amulet,
            &self.accessory,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    /// Slot → item id, the form stored on a character.
    pub fn slot_ids(&self) -> BTreeMap<EquipmentSlot, String> {
        EquipmentSlot::all()
            .into_iter()
            .filter_map(|slot| self.get(slot).as_ref().map(|item| (slot, item.id.clone())))
            .collect()
    }

    /// AC from worn items: armor sets the base, a shield adds its bonus, and
    /// helmet, ring, amulet and accessory bonuses stack on top.
    pub fn armor_class(&self, dex_mod: i32) -> AcBreakdown {
        let armor = self
            .armor
            .as_ref()
            .and_then(Item::as_armor)
            .unwrap_or_else(ArmorDefinition::unarmored);
        let shield = self.shield.as_ref().and_then(Item::as_shield);
        let extra: i32 = [&self.helmet, &self.ring, &self.amulet, &self.accessory]
            .into_iter()
            .flatten()
            .map(Item::ac_bonus)
            .sum();

        calculate_ac(&armor, dex_mod, shield.as_ref(), extra)
    }

    pub fn saving_throw_bonus(&self) -> i32 {
        self.iter_equipped().map(Item::saving_throw_bonus).sum()
    }
}
