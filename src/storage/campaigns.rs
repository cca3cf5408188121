use super::characters::CharacterStore;
use super::persistence::{
    ensure_dir, file_name, json_files, read_json, record_file_name, write_json,
};
use crate::campaign::{Campaign, Difficulty, RosterRefresh};
use crate::core::constants::CAMPAIGNS_DIR;
use crate::error::{StoreError, StoreResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSummary {
    pub name: String,
    pub setting: String,
    pub difficulty: Difficulty,
    pub players: usize,
    pub file: String,
}

/// Campaigns stored as `<root>/campaigns/<name>.json`.
#[derive(Debug, Clone)]
pub struct CampaignStore {
    dir: PathBuf,
}

impl CampaignStore {
    pub fn new(root: &Path) -> StoreResult<Self> {
        let dir = ensure_dir(root.join(CAMPAIGNS_DIR))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, campaign: &Campaign) -> StoreResult<String> {
        campaign.validate()?;
        let file = record_file_name(&campaign.name, &campaign.id.to_string());
        write_json(&self.dir.join(&file), campaign)?;
        tracing::info!(name = %campaign.name, file = %file, "saved campaign");
        Ok(file)
    }

    /// Overwrites `file` in place, even if the campaign was renamed since it was loaded.
    pub fn save_as(&self, campaign: &Campaign, file: &str) -> StoreResult<()> {
        campaign.validate()?;
        write_json(&self.dir.join(file), campaign)
    }

    pub fn load(&self, file: &str) -> StoreResult<Campaign> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Err(StoreError::NotFound(file.to_string()));
        }
        read_json(&path)
    }

    /// Readable campaigns sorted by name. Unreadable files are logged and skipped.
    pub fn list(&self) -> StoreResult<Vec<CampaignSummary>> {
        let mut campaigns = Vec::new();
        for path in json_files(&self.dir)? {
            let file = file_name(&path);
            match read_json::<Campaign>(&path) {
                Ok(c) => campaigns.push(CampaignSummary {
                    name: c.name,
                    setting: c.setting,
                    difficulty: c.difficulty,
                    players: c.players.len(),
                    file,
                }),
                Err(e) => tracing::warn!(file = %file, error = %e, "skipping unreadable campaign"),
            }
        }
        campaigns.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(campaigns)
    }

    pub fn delete(&self, file: &str) -> StoreResult<()> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Err(StoreError::NotFound(file.to_string()));
        }
        fs::remove_file(path)?;
        tracing::info!(file = %file, "deleted campaign");
        Ok(())
    }

    /// Updates roster entries from their linked character files.
    ///
    /// Entries whose file cannot be loaded are kept unchanged and reported as missing.
    pub fn refresh_roster(&self, campaign: &mut Campaign, characters: &CharacterStore) -> RosterRefresh {
        let mut report = RosterRefresh::default();

        for entry in campaign.players.iter_mut() {
            let Some(file) = entry.character_file.clone() else {
                continue;
            };
            match characters.load(&file) {
                Ok(character) => {
                    if entry.sync_from(&character) {
                        report.updated.push(file);
                    }
                }
                Err(e) => {
                    tracing::warn!(file = %file, error = %e, "roster character unavailable");
                    report.missing.push(file);
                }
            }
        }
        report
    }
}
