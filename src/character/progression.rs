//! Level, experience and proficiency bonus.

use crate::core::constants::{
    BASE_PROFICIENCY_BONUS, LEVELS_PER_PROFICIENCY_STEP, MAX_LEVEL, MIN_LEVEL, XP_THRESHOLDS,
};
use crate::error::RulesError;

/// Checks that `level` is a character level and narrows it.
pub fn validate_level(level: i32) -> Result<u8, RulesError> {
    if (MIN_LEVEL as i32..=MAX_LEVEL as i32).contains(&level) {
        Ok(level as u8)
    } else {
        Err(RulesError::LevelOutOfRange(level))
    }
}

/// `2 + floor((L - 1) / 4)` with `L` clamped to `1..=20`.
pub fn proficiency_bonus(level: i32) -> i32 {
    let level = level.clamp(MIN_LEVEL as i32, MAX_LEVEL as i32);
    BASE_PROFICIENCY_BONUS + (level - 1) / LEVELS_PER_PROFICIENCY_STEP
}

/// Highest level whose threshold is at or below `xp`.
pub fn level_from_experience(xp: u32) -> u8 {
    // Thresholds are strictly increasing and start at 0, so this is always >= 1.
    XP_THRESHOLDS.partition_point(|&threshold| threshold <= xp) as u8
}

/// Minimum cumulative experience for `level`.
pub fn experience_for_level(level: u8) -> Result<u32, RulesError> {
    let level = validate_level(level as i32)?;
    Ok(XP_THRESHOLDS[(level - 1) as usize])
}

/// Threshold of the level after `level`, or `None` at the level cap.
pub fn experience_for_next_level(level: u8) -> Option<u32> {
    if !(MIN_LEVEL..MAX_LEVEL).contains(&level) {
        return None;
    }
    Some(XP_THRESHOLDS[level as usize])
}

/// Experience still needed to reach the next level, or `None` at the level cap.
pub fn experience_remaining(level: u8, xp: u32) -> Option<u32> {
    experience_for_next_level(level).map(|next| next.saturating_sub(xp))
}
