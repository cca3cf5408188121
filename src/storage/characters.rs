use super::persistence::{
    ensure_dir, file_name, json_files, read_json, record_file_name, write_json,
};
use crate::character::{Character, CharacterClass};
use crate::core::constants::CHARACTERS_DIR;
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One line of the character list. Unreadable files are listed with `is_corrupted` set.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSummary {
    pub id: Option<Uuid>,
    pub name: String,
    pub class: Option<CharacterClass>,
    pub level: u8,
    pub file: String,
    pub last_saved: Option<DateTime<Utc>>,
    pub is_corrupted: bool,
}

/// Character sheets stored as `<root>/characters/<name>.json`.
#[derive(Debug, Clone)]
pub struct CharacterStore {
    dir: PathBuf,
}

impl CharacterStore {
    pub fn new(root: &Path) -> StoreResult<Self> {
        let dir = ensure_dir(root.join(CHARACTERS_DIR))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_for(character: &Character) -> String {
        record_file_name(&character.name, &character.id.to_string())
    }

    /// True when `file` holds a readable character with a different id.
    fn held_by_other(&self, file: &str, id: Uuid) -> bool {
        let path = self.dir.join(file);
        path.is_file() && read_json::<Character>(&path).is_ok_and(|c| c.id != id)
    }

    /// Validates and writes the character, stamping the save time. Returns the file name.
    ///
    /// Fails with [`StoreError::FileTaken`] when another character already uses the file.
    pub fn save(&self, character: &Character) -> StoreResult<String> {
        character.validate()?;

        let mut record = character.clone();
        record.touch();

        let file = Self::file_for(&record);
        if self.held_by_other(&file, record.id) {
            return Err(StoreError::FileTaken { file });
        }
        write_json(&self.dir.join(&file), &record)?;
        tracing::info!(name = %record.name, file = %file, "saved character");
        Ok(file)
    }

    pub fn load(&self, file: &str) -> StoreResult<Character> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Err(StoreError::NotFound(file.to_string()));
        }
        let character: Character = read_json(&path)?;
        character.validate()?;
        Ok(character)
    }

    pub fn exists(&self, file: &str) -> bool {
        self.dir.join(file).is_file()
    }

    /// Every character file, most recently saved first.
    pub fn list(&self) -> StoreResult<Vec<CharacterSummary>> {
        let mut characters = Vec::new();

        for path in json_files(&self.dir)? {
            let file = file_name(&path);
            match self.load(&file) {
                Ok(c) => characters.push(CharacterSummary {
                    id: Some(c.id),
                    name: c.name,
                    class: Some(c.class),
                    level: c.level,
                    file,
                    last_saved: c.last_saved,
                    is_corrupted: false,
                }),
                Err(e) => {
                    tracing::warn!(file = %file, error = %e, "unreadable character file");
                    characters.push(CharacterSummary {
                        id: None,
                        name: "[CORRUPTED]".to_string(),
                        class: None,
                        level: 0,
                        file,
                        last_saved: None,
                        is_corrupted: true,
                    });
                }
            }
        }

        characters.sort_by(|a, b| b.last_saved.cmp(&a.last_saved));
        Ok(characters)
    }

    pub fn delete(&self, file: &str) -> StoreResult<()> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Err(StoreError::NotFound(file.to_string()));
        }
        fs::remove_file(path)?;
        tracing::info!(file = %file, "deleted character");
        Ok(())
    }

    /// Renames a stored character, moving it to the file for its new name.
    ///
    /// The rename is refused when the new file already exists.
    pub fn rename(&self, file: &str, new_name: &str) -> StoreResult<String> {
        let mut character = self.load(file)?;
        character.name = new_name.trim().to_string();

        let target = Self::file_for(&character);
        if target != file && self.exists(&target) {
            return Err(StoreError::FileTaken { file: target });
        }
        let new_file = self.save(&character)?;
        if new_file != file {
            fs::remove_file(self.dir.join(file))?;
        }
        Ok(new_file)
    }
}
