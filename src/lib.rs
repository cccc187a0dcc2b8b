//! pacenote-patcher library
//!
//! Renames the "flat right" / "flat left" corner calls of the Richard Burns
//! Rally Pacenote plugin to "max right" / "max left".
//!
//! The editors work on whole files: each file is read once, edited in memory
//! and written back once.

pub mod config;
pub mod logging;
pub mod pacenote;
