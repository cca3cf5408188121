//! dnd-keeper - D&D 5e campaign keeper library
//!
//! Rules calculations (dice, abilities, spellcasting, attack simulation,
//! armor class) plus typed records and the JSON stores that keep them.

pub mod campaign;
pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod dice;
pub mod error;
pub mod items;
pub mod spells;
pub mod storage;
