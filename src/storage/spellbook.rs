use super::persistence::{ensure_dir, read_json, write_json};
use crate::character::CharacterClass;
use crate::core::constants::{MAX_SPELL_LEVEL, SPELLS_DIR, SPELLS_FILE};
use crate::error::{StoreError, StoreResult};
use crate::spells::{sample_spells, School, Spell, SpellRef};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Spells grouped by level, keyed "0".."9" on disk.
type SpellsByLevel = BTreeMap<String, Vec<Spell>>;

/// Filter for [`SpellBook::search`]. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct SpellQuery {
    /// Case-insensitive substring of the name or description.
    pub text: Option<String>,
    pub level: Option<u8>,
    pub school: Option<School>,
    pub class: Option<CharacterClass>,
}

impl SpellQuery {
    pub fn matches(&self, spell: &Spell) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !spell.name.to_lowercase().contains(&needle)
                && !spell.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        self.level.map_or(true, |l| spell.level == l)
            && self.school.map_or(true, |s| spell.school == s)
            && self.class.map_or(true, |c| spell.is_available_to(c))
    }
}

/// The spell repository at `<root>/spells/spells.json`.
///
/// Every mutation is written through to disk.
#[derive(Debug, Clone)]
pub struct SpellBook {
    path: PathBuf,
    levels: SpellsByLevel,
}

fn empty_levels() -> SpellsByLevel {
    (0..=MAX_SPELL_LEVEL)
        .map(|level| (level.to_string(), Vec::new()))
        .collect()
}

impl SpellBook {
    /// Opens the spell book, creating an empty one if the file does not exist yet.
    ///
    /// Stored spells are validated and filed under their own level. Entries that
    /// fail to parse, fail validation or repeat a spell are logged and skipped.
    pub fn load_or_init(root: &Path) -> StoreResult<Self> {
        let path = ensure_dir(root.join(SPELLS_DIR))?.join(SPELLS_FILE);
        let mut book = Self {
            path,
            levels: empty_levels(),
        };

        if !book.path.exists() {
            book.save()?;
            return Ok(book);
        }

        let stored: BTreeMap<String, Vec<Value>> = read_json(&book.path)?;
        for (key, entries) in stored {
            for entry in entries {
                let result = serde_json::from_value::<Spell>(entry)
                    .map_err(StoreError::from)
                    .and_then(|spell| {
                        if spell.level.to_string() != key {
                            tracing::warn!(
                                spell = %spell.name,
                                filed_under = %key,
                                level = spell.level,
                                "re-filing spell under its own level"
                            );
                        }
                        book.add_unsaved(spell)
                    });
                if let Err(e) = result {
                    tracing::warn!(level = %key, error = %e, "skipping stored spell");
                }
            }
        }
        tracing::debug!(path = %book.path.display(), spells = book.len(), "loaded spell book");
        Ok(book)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> StoreResult<()> {
        write_json(&self.path, &self.levels)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.levels.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn at_level(&self, level: u8) -> &[Spell] {
        self.levels
            .get(&level.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn contains(&self, key: &SpellRef) -> bool {
        self.at_level(key.level).iter().any(|s| key.matches(s))
    }

    fn insert(&mut self, spell: Spell) {
        self.levels
            .entry(spell.level.to_string())
            .or_default()
            .push(spell);
    }

    fn take(&mut self, key: &SpellRef) -> Option<Spell> {
        let spells = self.levels.get_mut(&key.level.to_string())?;
        let index = spells.iter().position(|s| key.matches(s))?;
        Some(spells.remove(index))
    }

    fn add_unsaved(&mut self, spell: Spell) -> StoreResult<()> {
        spell.validate()?;
        if self.contains(&spell.key()) {
            return Err(StoreError::Duplicate {
                name: spell.name,
                level: spell.level,
            });
        }
        self.insert(spell);
        Ok(())
    }

    /// Adds a spell. A spell with the same name (any case) at the same level is a duplicate.
    pub fn add(&mut self, spell: Spell) -> StoreResult<()> {
        let name = spell.name.clone();
        self.add_unsaved(spell)?;
        self.save()?;
        tracing::info!(spell = %name, "added spell");
        Ok(())
    }

    /// Replaces the spell identified by `original` with `updated`, moving levels if needed.
    pub fn edit(&mut self, original: &SpellRef, updated: Spell) -> StoreResult<()> {
        updated.validate()?;
        if !self.contains(original) {
            return Err(StoreError::NotFound(original.to_string()));
        }
        let new_key = updated.key();
        if new_key != *original && self.contains(&new_key) {
            return Err(StoreError::Duplicate {
                name: updated.name,
                level: updated.level,
            });
        }

        self.take(original);
        self.insert(updated);
        self.save()?;
        tracing::info!(spell = %new_key, "edited spell");
        Ok(())
    }

    pub fn remove(&mut self, key: &SpellRef) -> StoreResult<Spell> {
        let spell = self
            .take(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        self.save()?;
        tracing::info!(spell = %key, "removed spell");
        Ok(spell)
    }

    pub fn search(&self, query: &SpellQuery) -> Vec<&Spell> {
        self.iter().filter(|s| query.matches(s)).collect()
    }

    /// Case-insensitive lookup, at one level or across all of them (lowest level first).
    pub fn find(&self, name: &str, level: Option<u8>) -> Option<&Spell> {
        let name = name.trim();
        match level {
            Some(level) => self
                .at_level(level)
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(name)),
            None => self.iter().find(|s| s.name.eq_ignore_ascii_case(name)),
        }
    }

    pub fn for_class(&self, class: CharacterClass, min_level: u8, max_level: u8) -> Vec<&Spell> {
        (min_level..=max_level.min(MAX_SPELL_LEVEL))
            .flat_map(|level| self.at_level(level))
            .filter(|s| s.is_available_to(class))
            .collect()
    }

    /// Imports spells from a JSON list or a level-keyed map. Returns how many were added.
    ///
    /// Entries that fail to parse, fail validation or duplicate an existing spell are skipped.
    pub fn import_file(&mut self, path: &Path) -> StoreResult<usize> {
        let raw: Value = read_json(path)?;
        let entries: Vec<Value> = match raw {
            Value::Array(items) => items,
            Value::Object(levels) => levels
                .into_iter()
                .filter_map(|(_, v)| match v {
                    Value::Array(items) => Some(items),
                    _ => None,
                })
                .flatten()
                .collect(),
            _ => return Err(StoreError::NotAList(path.to_path_buf())),
        };

        let mut imported = 0;
        for entry in entries {
            let result = serde_json::from_value::<Spell>(entry)
                .map_err(StoreError::from)
                .and_then(|spell| self.add_unsaved(spell));
            match result {
                Ok(()) => imported += 1,
                Err(e) => tracing::warn!(error = %e, "skipping imported spell"),
            }
        }

        if imported > 0 {
            self.save()?;
        }
        tracing::info!(path = %path.display(), imported, "imported spells");
        Ok(imported)
    }

    /// Writes every spell, grouped by level, to `path`.
    pub fn export_file(&self, path: &Path) -> StoreResult<()> {
        write_json(path, &self.levels)
    }

    /// Adds the sample spells when the book is empty. Returns how many were added.
    pub fn seed_samples(&mut self) -> StoreResult<usize> {
        if !self.is_empty() {
            return Ok(0);
        }
        let mut added = 0;
        for spell in sample_spells() {
            self.add_unsaved(spell)?;
            added += 1;
        }
        self.save()?;
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spells::DamageType;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_book() -> (TempDir, SpellBook) {
        let dir = TempDir::new().unwrap();
        let book = SpellBook::load_or_init(dir.path()).unwrap();
        (dir, book)
    }

    fn bolt(name: &str, level: u8) -> Spell {
        Spell {
            damage: "2d10".to_string(),
            damage_type: Some(DamageType::Lightning),
            ..Spell::new(name, level, School::Evocation, &[CharacterClass::Wizard])
        }
    }

    #[test]
    fn test_init_creates_file_with_all_levels() {
        let (_dir, book) = create_test_book();
        assert!(book.path().exists());
        assert!(book.is_empty());
        let stored: SpellsByLevel = read_json(book.path()).unwrap();
        assert_eq!(stored.len(), 10);
    }

    #[test]
    fn test_load_refiles_and_validates_stored_spells() {
        let dir = TempDir::new().unwrap();
        let spells_dir = dir.path().join(SPELLS_DIR);
        fs::create_dir_all(&spells_dir).unwrap();
        fs::write(
            spells_dir.join(SPELLS_FILE),
            r#"{
                "3": [
                    {"name":"Cone of Cold","level":5,"school":"Evocation","classes":["Wizard"],"damage":"8d8"},
                    {"name":"Broken","level":3,"school":"Evocation","classes":["Wizard"],"damage":"8x6"},
                    {"level":3}
                ],
                "5": [
                    {"name":"CONE OF COLD","level":5,"school":"Evocation","classes":["Wizard"]}
                ]
            }"#,
        )
        .unwrap();

        let mut book = SpellBook::load_or_init(dir.path()).unwrap();
        assert_eq!(book.len(), 1);
        assert!(book.at_level(3).is_empty());
        assert_eq!(book.at_level(5)[0].name, "Cone of Cold");

        let removed = book.remove(&SpellRef::new("cone of cold", 5)).unwrap();
        assert_eq!(removed.damage, "8d8");
        assert!(book.is_empty());
    }

    #[test]
    fn test_duplicate_rejected_per_level() {
        let (_dir, mut book) = create_test_book();
        book.add(bolt("Witch Bolt", 1)).unwrap();
        assert!(matches!(
            book.add(bolt("WITCH BOLT", 1)),
            Err(StoreError::Duplicate { level: 1, .. })
        ));
        // Same name at another level is a different spell.
        book.add(bolt("Witch Bolt", 2)).unwrap();
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_changes_persist() {
        let (dir, mut book) = create_test_book();
        book.add(bolt("Chaos Bolt", 1)).unwrap();

        let reopened = SpellBook::load_or_init(dir.path()).unwrap();
        assert!(reopened.find("chaos bolt", Some(1)).is_some());
    }

    #[test]
    fn test_edit_moves_level() {
        let (_dir, mut book) = create_test_book();
        book.add(bolt("Arc", 1)).unwrap();
        book.edit(&SpellRef::new("arc", 1), bolt("Arc", 2)).unwrap();
        assert!(book.at_level(1).is_empty());
        assert_eq!(book.at_level(2).len(), 1);
    }

    #[test]
    fn test_edit_into_existing_is_duplicate() {
        let (_dir, mut book) = create_test_book();
        book.add(bolt("Arc", 1)).unwrap();
        book.add(bolt("Spark", 1)).unwrap();
        assert!(matches!(
            book.edit(&SpellRef::new("Arc", 1), bolt("Spark", 1)),
            Err(StoreError::Duplicate { .. })
        ));
        assert!(matches!(
            book.edit(&SpellRef::new("Nope", 1), bolt("Nope", 1)),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove() {
        let (_dir, mut book) = create_test_book();
        book.add(bolt("Arc", 1)).unwrap();
        let removed = book.remove(&SpellRef::new("ARC", 1)).unwrap();
        assert_eq!(removed.name, "Arc");
        assert!(book.remove(&SpellRef::new("Arc", 1)).is_err());
    }

    #[test]
    fn test_search_and_for_class() {
        let (_dir, mut book) = create_test_book();
        assert_eq!(book.seed_samples().unwrap(), sample_spells().len());
        assert_eq!(book.seed_samples().unwrap(), 0);

        let query = SpellQuery {
            text: Some("fire".to_string()),
            ..SpellQuery::default()
        };
        let hits = book.search(&query);
        assert!(hits.iter().any(|s| s.name == "Fireball"));

        let cleric_low = book.for_class(CharacterClass::Cleric, 0, 3);
        assert!(cleric_low.iter().all(|s| s.level <= 3));
        assert!(cleric_low.iter().any(|s| s.name == "Cure Wounds"));
        assert!(!cleric_low.iter().any(|s| s.name == "Holy Word"));

        let evocation_3 = book.search(&SpellQuery {
            level: Some(3),
            school: Some(School::Evocation),
            ..SpellQuery::default()
        });
        assert_eq!(evocation_3.len(), 1);
    }

    #[test]
    fn test_find_across_levels() {
        let (_dir, mut book) = create_test_book();
        book.seed_samples().unwrap();
        assert_eq!(book.find("magic missile", None).unwrap().level, 1);
        assert!(book.find("Magic Missile", Some(2)).is_none());
    }

    #[test]
    fn test_import_skips_invalid_entries() {
        let (dir, mut book) = create_test_book();
        book.add(bolt("Arc", 1)).unwrap();

        let import = dir.path().join("import.json");
        fs::write(
            &import,
            r#"[
                {"name":"Frost Lance","level":2,"school":"Evocation","classes":["Wizard"],"damage":"3d8"},
                {"name":"Arc","level":1,"school":"Evocation","classes":["Wizard"]},
                {"name":"","level":1,"school":"Evocation","classes":["Wizard"]},
                {"name":"Broken","level":1,"school":"Evocation","classes":["Wizard"],"damage":"3x8"},
                {"level":4}
            ]"#,
        )
        .unwrap();

        assert_eq!(book.import_file(&import).unwrap(), 1);
        assert!(book.find("Frost Lance", Some(2)).is_some());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_export_then_import_into_fresh_book() {
        let (dir, mut book) = create_test_book();
        book.seed_samples().unwrap();
        let export = dir.path().join("export.json");
        book.export_file(&export).unwrap();

        let other_root = TempDir::new().unwrap();
        let mut fresh = SpellBook::load_or_init(other_root.path()).unwrap();
        assert_eq!(fresh.import_file(&export).unwrap(), book.len());
    }

    #[test]
    fn test_import_rejects_scalar_file() {
        let (dir, mut book) = create_test_book();
        let import = dir.path().join("scalar.json");
        fs::write(&import, "42").unwrap();
        assert!(matches!(book.import_file(&import), Err(StoreError::NotAList(_))));
    }
}
