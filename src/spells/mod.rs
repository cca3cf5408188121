//! Spell records, sample spells and spellcasting math.

pub mod casting;
pub mod samples;
pub mod types;

pub use casting::*;
pub use samples::*;
pub use types::*;
