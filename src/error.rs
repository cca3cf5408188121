//! Error types shared across the rules core and the stores.

use crate::core::constants::{MAX_DICE_COUNT, MAX_DICE_MODIFIER};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to parse a dice formula string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("invalid dice notation '{0}' (expected NdM, NdM+K or NdM-K)")]
    InvalidNotation(String),
    #[error("dice formula '{0}' must roll at least one die")]
    ZeroDice(String),
    #[error("unsupported die d{0} (use d4, d6, d8, d10, d12 or d20)")]
    UnsupportedDie(u32),
    #[error("cannot roll {0} dice at once (at most {max})", max = MAX_DICE_COUNT)]
    TooManyDice(u32),
    #[error("modifier {0} is outside ±{max}", max = MAX_DICE_MODIFIER)]
    ModifierOutOfRange(i32),
}

/// Input outside the domain of a rules calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("ability score {0} is outside 1..=30")]
    AbilityScoreOutOfRange(i32),
    #[error("character level {0} is outside 1..=20")]
    LevelOutOfRange(i32),
    #[error("spell level {0} is outside 0..=9")]
    SpellLevelOutOfRange(i32),
    #[error("cannot cast a level {spell_level} spell at level {cast_level}")]
    CastLevelTooLow { spell_level: u8, cast_level: u8 },
    #[error("unknown character class '{0}'")]
    UnknownClass(String),
    #[error("unknown ability '{0}'")]
    UnknownAbility(String),
    #[error("unknown armor proficiency '{0}'")]
    UnknownProficiency(String),
    #[error(transparent)]
    InvalidDice(#[from] DiceError),
}

/// A record failed validation before being stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must have a name")]
    MissingName(&'static str),
    #[error("campaign '{0}' must have a setting")]
    MissingSetting(String),
    #[error("spell '{0}' must list at least one class")]
    NoClasses(String),
    #[error("{field}: {source}")]
    Formula {
        field: &'static str,
        #[source]
        source: DiceError,
    },
    #[error("experience {experience} is below the {minimum} required for level {level}")]
    ExperienceBelowLevel {
        level: u8,
        experience: u32,
        minimum: u32,
    },
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Failure in one of the JSON-backed stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Rules(#[from] RulesError),
    #[error("a spell named '{name}' already exists at level {level}")]
    Duplicate { name: String, level: u8 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("'{file}' already holds a different record")]
    FileTaken { file: String },
    #[error("could not resolve a data directory")]
    NoDataDir,
    #[error("expected a JSON list of records in {0}")]
    NotAList(PathBuf),
}

pub type StoreResult<T> = Result<T, StoreError>;
