//! Terminal styling helpers
//!
//! Colors are always emitted; `anstream::println` strips them when stdout
//! is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize as _;
use terminal_link::Link;

/// Checkmark glyph used in summaries.
pub const CHECK: &str = "✓";

/// Styling extension used across the CLI
pub trait Stylize {
    /// De-emphasized supporting text
    fn muted(&self) -> String;
    /// Emphasized text
    fn emphasis(&self) -> String;
    /// Highlighted identifiers (branch names, PR numbers)
    fn accent(&self) -> String;
    /// Positive outcomes
    fn success(&self) -> String;
    /// Warnings and soft failures
    fn warn(&self) -> String;
}

impl<T: std::fmt::Display> Stylize for T {
    fn muted(&self) -> String {
        format!("{}", self.dimmed())
    }

    fn emphasis(&self) -> String {
        format!("{}", self.bold())
    }

    fn accent(&self) -> String {
        format!("{}", self.cyan())
    }

    fn success(&self) -> String {
        format!("{}", self.green())
    }

    fn warn(&self) -> String {
        format!("{}", self.yellow())
    }
}

/// Green checkmark.
pub fn check() -> String {
    CHECK.success()
}

/// Spinner style shared by long-running fetch loops.
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Render a clickable link where the terminal supports OSC-8 hyperlinks,
/// falling back to `text (url)`.
pub fn link(text: &str, url: &str) -> String {
    if supports_hyperlinks::supports_hyperlinks() {
        Link::new(text, url).to_string()
    } else {
        format!("{text} ({url})")
    }
}
