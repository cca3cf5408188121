use crate::core::constants::{MAX_DICE_COUNT, MAX_DICE_MODIFIER, SUPPORTED_DIE_SIDES};
use crate::error::DiceError;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn dice_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)d(\d+)([+-]\d+)?$").expect("dice pattern compiles"))
}

/// A parsed `NdM[+K|-K]` formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceFormula {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

/// Deterministic bounds plus one random roll of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub min: i32,
    pub avg: f64,
    pub max: i32,
    pub rolled: i32,
}

impl Evaluation {
    /// Result for an empty or unparseable formula.
    pub const ZERO: Evaluation = Evaluation {
        min: 0,
        avg: 0.0,
        max: 0,
        rolled: 0,
    };
}

impl DiceFormula {
    pub fn new(count: u32, sides: u32, modifier: i32) -> Result<Self, DiceError> {
        if count == 0 {
            return Err(DiceError::ZeroDice(format!("{count}d{sides}")));
        }
        if count > MAX_DICE_COUNT {
            return Err(DiceError::TooManyDice(count));
        }
        if !SUPPORTED_DIE_SIDES.contains(&sides) {
            return Err(DiceError::UnsupportedDie(sides));
        }
        if modifier.abs() > MAX_DICE_MODIFIER {
            return Err(DiceError::ModifierOutOfRange(modifier));
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Parses a formula. Blank input is the "no roll" sentinel and yields `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>, DiceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let caps = dice_pattern()
            .captures(trimmed)
            .ok_or_else(|| DiceError::InvalidNotation(trimmed.to_string()))?;

        let count: u32 = caps[1]
            .parse()
            .map_err(|_| DiceError::InvalidNotation(trimmed.to_string()))?;
        let sides: u32 = caps[2]
            .parse()
            .map_err(|_| DiceError::InvalidNotation(trimmed.to_string()))?;
        let modifier: i32 = match caps.get(3) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| DiceError::InvalidNotation(trimmed.to_string()))?,
            None => 0,
        };

        if count == 0 {
            return Err(DiceError::ZeroDice(trimmed.to_string()));
        }
        Self::new(count, sides, modifier).map(Some)
    }

    pub fn min(&self) -> i32 {
        self.count as i32 + self.modifier
    }

    pub fn max(&self) -> i32 {
        (self.count * self.sides) as i32 + self.modifier
    }

    /// Midpoint of min and max.
    pub fn average(&self) -> f64 {
        (self.min() + self.max()) as f64 / 2.0
    }

    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        let sum: u32 = (0..self.count).map(|_| rng.gen_range(1..=self.sides)).sum();
        sum as i32 + self.modifier
    }

    /// Bounds and a roll, all shifted by an extra `modifier`.
    pub fn evaluate(&self, modifier: i32, rng: &mut impl Rng) -> Evaluation {
        let min = self.min().saturating_add(modifier);
        let max = self.max().saturating_add(modifier);
        Evaluation {
            min,
            avg: (min as f64 + max as f64) / 2.0,
            max,
            rolled: self.roll(rng).saturating_add(modifier),
        }
    }

    pub fn has_modifier(&self) -> bool {
        self.modifier != 0
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.count, self.sides),
            m if m > 0 => write!(f, "{}d{}+{}", self.count, self.sides, m),
            m => write!(f, "{}d{}{}", self.count, self.sides, m),
        }
    }
}

/// True when `input` is blank or a well-formed formula.
pub fn is_valid_formula(input: &str) -> bool {
    DiceFormula::parse(input).is_ok()
}

/// Evaluates a formula string. Blank or malformed input yields [`Evaluation::ZERO`].
pub fn evaluate(input: &str, modifier: i32, rng: &mut impl Rng) -> Evaluation {
    match DiceFormula::parse(input) {
        Ok(Some(formula)) => formula.evaluate(modifier, rng),
        Ok(None) | Err(_) => Evaluation::ZERO,
    }
}

/// Like [`evaluate`] for an absent formula field.
pub fn evaluate_optional(input: Option<&str>, modifier: i32, rng: &mut impl Rng) -> Evaluation {
    input.map_or(Evaluation::ZERO, |s| evaluate(s, modifier, rng))
}
