//! Campaign records and their player rosters.

pub mod types;

pub use types::*;
