//! Preview module for Markpress
//!
//! This module builds the styled page shown to the user and pushes it to a
//! visible surface: a live Chrome window, or a one-shot page in the system
//! browser.

mod document;
mod external;
mod live;

pub use document::StyledDocument;
pub use external::open_in_browser;
pub use live::{BrowserPreview, PreviewSurface};
