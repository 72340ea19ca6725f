//! File operations module for Markpress
//!
//! This module provides the native save dialog used when exporting.

pub mod dialogs;
