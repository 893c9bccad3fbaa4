//! snipkit Library
//!
//! Inspects and validates snippet corpora built on `snipkit-core`.

// Module declarations
pub mod commands;
pub mod config;

pub use snipkit_core as core;
