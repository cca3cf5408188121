//! Runtime configuration: data directory, RNG seed and simulation defaults.

use crate::core::constants::DEFAULT_TARGET_SAVE_BONUS;
use crate::error::{StoreError, StoreResult};
use directories::ProjectDirs;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "DND_KEEPER_DATA_DIR";
pub const ENV_SEED: &str = "DND_KEEPER_SEED";
pub const ENV_SAVE_BONUS: &str = "DND_KEEPER_SAVE_BONUS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the character, campaign, spell and item stores
    pub data_dir: PathBuf,

    /// Random seed for reproducible rolls (None = entropy)
    pub seed: Option<u64>,

    /// Save bonus assumed for targets of simulated casts
    pub target_save_bonus: i32,
}

impl Config {
    /// Config rooted at `data_dir` with default settings.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            seed: None,
            target_save_bonus: DEFAULT_TARGET_SAVE_BONUS,
        }
    }

    /// Reads the process environment, falling back to the platform data directory.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StoreResult<Self> {
        let data_dir = match lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let mut config = Self::with_data_dir(data_dir);

        if let Some(raw) = lookup(ENV_SEED) {
            match raw.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {ENV_SEED}"),
            }
        }
        if let Some(raw) = lookup(ENV_SAVE_BONUS) {
            match raw.trim().parse() {
                Ok(bonus) => config.target_save_bonus = bonus,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {ENV_SAVE_BONUS}"),
            }
        }
        Ok(config)
    }

    /// Seeded RNG when a seed is configured, otherwise seeded from entropy.
    pub fn make_rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

fn default_data_dir() -> StoreResult<PathBuf> {
    ProjectDirs::from("", "", "dnd-keeper")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StoreError::NoDataDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_apply() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/tmp/keeper"),
            (ENV_SEED, "42"),
            (ENV_SAVE_BONUS, "-1"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/keeper"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.target_save_bonus, -1);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/tmp/keeper"),
            (ENV_SEED, "soon"),
            (ENV_SAVE_BONUS, "lots"),
        ]))
        .unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.target_save_bonus, DEFAULT_TARGET_SAVE_BONUS);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut config = Config::with_data_dir("/tmp/keeper");
        config.seed = Some(7);
        let a: Vec<u32> = (0..5).map(|_| config.make_rng().gen_range(1..=20)).collect();
        let b: Vec<u32> = (0..5).map(|_| config.make_rng().gen_range(1..=20)).collect();
        assert_eq!(a, b);
    }
}
