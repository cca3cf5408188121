//! Dice notation: parsing, bounds and rolling.

pub mod formula;
pub mod pool;

pub use formula::*;
pub use pool::*;
