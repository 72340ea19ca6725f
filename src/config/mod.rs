//! Configuration module for Markpress
//!
//! This module handles user preferences and application settings, read from
//! JSON in the platform-specific config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
