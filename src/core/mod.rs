//! Game-rule constants shared by every module.

pub mod constants;
