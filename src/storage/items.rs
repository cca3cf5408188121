use super::persistence::{ensure_dir, file_stem, json_files, read_json, write_json};
use crate::character::Character;
use crate::core::constants::ITEMS_DIR;
use crate::error::{StoreError, StoreResult};
use crate::items::{base_item_id, default_items, Equipment, Item, ItemKindTag};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Item catalog stored as `<root>/items/<kind>/<id>.json`.
#[derive(Debug, Clone)]
pub struct ItemStore {
    dir: PathBuf,
}

impl ItemStore {
    pub fn new(root: &Path) -> StoreResult<Self> {
        let dir = ensure_dir(root.join(ITEMS_DIR))?;
        Ok(Self { dir })
    }

    fn kind_dir(&self, kind: ItemKindTag) -> PathBuf {
        self.dir.join(kind.dir_name())
    }

    fn item_path(&self, kind: ItemKindTag, id: &str) -> PathBuf {
        self.kind_dir(kind).join(format!("{id}.json"))
    }

    pub fn save(&self, item: &Item) -> StoreResult<()> {
        item.validate()?;
        write_json(&self.item_path(item.tag(), &item.id), item)?;
        tracing::debug!(id = %item.id, kind = %item.tag(), "saved item");
        Ok(())
    }

    pub fn load(&self, kind: ItemKindTag, id: &str) -> StoreResult<Item> {
        let path = self.item_path(kind, id);
        if !path.exists() {
            return Err(StoreError::NotFound(format!("{kind}/{id}")));
        }
        read_json(&path)
    }

    /// Looks an id up in every kind directory.
    pub fn find(&self, id: &str) -> Option<Item> {
        ItemKindTag::all()
            .into_iter()
            .find_map(|kind| self.load(kind, id).ok())
    }

    /// Items of one kind, sorted by name. Unreadable files are logged and skipped.
    pub fn list_kind(&self, kind: ItemKindTag) -> StoreResult<Vec<Item>> {
        let mut items = Vec::new();
        for path in json_files(&self.kind_dir(kind))? {
            match read_json::<Item>(&path) {
                Ok(item) => items.push(item),
                Err(e) => tracing::warn!(
                    file = %path.display(),
                    error = %e,
                    "skipping unreadable item"
                ),
            }
        }
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    pub fn list_all(&self) -> StoreResult<BTreeMap<ItemKindTag, Vec<Item>>> {
        let mut all = BTreeMap::new();
        for kind in ItemKindTag::all() {
            all.insert(kind, self.list_kind(kind)?);
        }
        Ok(all)
    }

    pub fn delete(&self, kind: ItemKindTag, id: &str) -> StoreResult<()> {
        let path = self.item_path(kind, id);
        if !path.exists() {
            return Err(StoreError::NotFound(format!("{kind}/{id}")));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// `<kind>_<slug>`, with `_1`, `_2`, ... appended while the id is taken.
    pub fn unique_id(&self, kind: ItemKindTag, name: &str) -> String {
        let base = base_item_id(kind, name);
        let mut id = base.clone();
        let mut counter = 0;
        while self.item_path(kind, &id).exists() {
            counter += 1;
            id = format!("{base}_{counter}");
        }
        id
    }

    /// Writes the default catalog, skipping items whose id already exists. Returns how many were written.
    pub fn seed_defaults(&self) -> StoreResult<usize> {
        let mut written = 0;
        for item in default_items() {
            if self.item_path(item.tag(), &item.id).exists() {
                continue;
            }
            self.save(&item)?;
            written += 1;
        }
        tracing::info!(written, "seeded default items");
        Ok(written)
    }

    /// Resolves a character's equipped item ids. Ids that no longer exist are dropped.
    pub fn equipment_for(&self, character: &Character) -> Equipment {
        let mut equipment = Equipment::new();
        for (slot, id) in &character.equipped {
            match self.find(id) {
                Some(item) if item.tag().slot() == Some(*slot) => equipment.set(*slot, Some(item)),
                _ => tracing::warn!(id = %id, ?slot, "equipped item unavailable"),
            }
        }
        equipment
    }

    pub fn ids_of_kind(&self, kind: ItemKindTag) -> StoreResult<Vec<String>> {
        Ok(json_files(&self.kind_dir(kind))?
            .iter()
            .map(|p| file_stem(p))
            .collect())
    }
}
