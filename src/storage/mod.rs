//! JSON-backed record stores rooted at a data directory.

pub mod campaigns;
pub mod characters;
pub mod items;
pub mod persistence;
pub mod spellbook;

pub use campaigns::*;
pub use characters::*;
pub use items::*;
pub use spellbook::*;
