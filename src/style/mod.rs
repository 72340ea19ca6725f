//! Stylesheet composition
//!
//! The stylesheet applied to the preview and to exports is the fixed
//! baseline followed by the user's CSS. Nothing is parsed or validated:
//! later rules win by ordinary cascade order.

mod baseline;

pub use baseline::BASELINE_CSS;

/// Compose the baseline stylesheet with user CSS, baseline first.
pub fn compose_stylesheet(user_css: &str) -> String {
    compose_with_baseline(BASELINE_CSS, user_css)
}

/// Compose an arbitrary baseline with user CSS.
///
/// The result is `baseline`, a newline, then `user_css`, byte for byte.
pub fn compose_with_baseline(baseline: &str, user_css: &str) -> String {
    let mut stylesheet = String::with_capacity(baseline.len() + user_css.len() + 1);
    stylesheet.push_str(baseline);
    stylesheet.push('\n');
    stylesheet.push_str(user_css);
    stylesheet
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
