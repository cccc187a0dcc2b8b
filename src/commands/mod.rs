//! CLI commands

pub mod patch;
pub mod utils;
