//! Attack rolls, saving throws and spell cast simulation.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
