//! Item system: armor tables, item records, equipment and the default catalog.

pub mod armor;
pub mod catalog;
pub mod equipment;
pub mod types;

pub use armor::*;
pub use catalog::*;
pub use equipment::*;
pub use types::*;
