//! Character sheets: abilities, classes, proficiencies and level progression.

pub mod attributes;
pub mod classes;
pub mod derived_stats;
pub mod proficiencies;
pub mod progression;
pub mod sheet;

pub use attributes::*;
pub use classes::*;
pub use derived_stats::*;
pub use proficiencies::*;
pub use progression::*;
pub use sheet::*;
