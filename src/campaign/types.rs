use crate::character::{Character, CharacterClass, Race};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Deadly,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Deadly => "Deadly",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A roster line: a snapshot of a player character, optionally linked to its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub class: CharacterClass,
    pub race: Race,
    pub level: u8,
    /// Character file in the character store, when the entry was added from one.
    #[serde(default)]
    pub character_file: Option<String>,
}

impl PlayerEntry {
    pub fn from_character(character: &Character, file: Option<&str>) -> Self {
        Self {
            name: character.name.clone(),
            class: character.class,
            race: character.race,
            level: character.level,
            character_file: file.map(str::to_string),
        }
    }

    /// Copies name, class, race and level from `character`. Returns true if anything changed.
    pub fn sync_from(&mut self, character: &Character) -> bool {
        let before = self.clone();
        self.name = character.name.clone();
        self.class = character.class;
        self.race = character.race;
        self.level = character.level;
        *self != before
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub setting: String,
    #[serde(default)]
    pub special_rules: String,
    /// No sudden death.
    #[serde(default)]
    pub no_death: bool,
    #[serde(default)]
    pub modified_xp: bool,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn new(name: &str, setting: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            setting: setting.to_string(),
            special_rules: String::new(),
            no_death: false,
            modified_xp: false,
            difficulty: Difficulty::Normal,
            players: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName("campaign"));
        }
        if self.setting.trim().is_empty() {
            return Err(ValidationError::MissingSetting(self.name.clone()));
        }
        Ok(())
    }

    pub fn add_player(&mut self, entry: PlayerEntry) {
        self.players.push(entry);
    }

    /// Adds a stored character. A character already linked by the same file is replaced.
    pub fn add_character(&mut self, character: &Character, file: &str) {
        let entry = PlayerEntry::from_character(character, Some(file));
        match self
            .players
            .iter_mut()
            .find(|p| p.character_file.as_deref() == Some(file))
        {
            Some(existing) => *existing = entry,
            None => self.players.push(entry),
        }
    }

    pub fn remove_player(&mut self, index: usize) -> Option<PlayerEntry> {
        (index < self.players.len()).then(|| self.players.remove(index))
    }

    pub fn average_level(&self) -> Option<f64> {
        if self.players.is_empty() {
            return None;
        }
        let total: u32 = self.players.iter().map(|p| p.level as u32).sum();
        Some(total as f64 / self.players.len() as f64)
    }
}

/// Outcome of refreshing roster entries from their character files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterRefresh {
    /// Files whose entries changed.
    pub updated: Vec<String>,
    /// Files that could not be loaded; their entries are left as they were.
    pub missing: Vec<String>,
}

impl RosterRefresh {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}
