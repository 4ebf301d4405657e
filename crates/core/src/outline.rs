//! Plain-text outline output.
//!
//! Each slide is its title followed by one marked line per bullet, with
//! slides separated by a blank line.

use crate::types::{StructuredDeck, StructuredSlide};

/// Formatter for plain-text deck outlines.
#[derive(Debug, Clone)]
pub struct OutlineFormatter {
    /// Prefix written before each bullet.
    bullet_marker: String,
}

impl Default for OutlineFormatter {
    fn default() -> Self {
        Self {
            bullet_marker: "• ".to_string(),
        }
    }
}

impl OutlineFormatter {
    /// Create a new formatter using the `"• "` bullet marker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom bullet marker.
    pub fn with_bullet_marker(mut self, marker: impl Into<String>) -> Self {
        self.bullet_marker = marker.into();
        self
    }

    /// Format a deck as an outline.
    ///
    /// # Example output
    /// ```text
    /// Problem
    /// • Traffic is bad
    /// • Commute times rose
    ///
    /// Solution
    /// • Adaptive signal timing
    /// ```
    pub fn format(&self, deck: &StructuredDeck) -> String {
        deck.iter()
            .map(|(_, slide)| self.format_slide(slide))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format a deck, adding a trailing newline.
    pub fn format_with_newline(&self, deck: &StructuredDeck) -> String {
        let formatted = self.format(deck);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }

    /// Format a single slide: its title line, then one line per bullet.
    pub fn format_slide(&self, slide: &StructuredSlide) -> String {
        let mut lines = Vec::with_capacity(slide.bullets.len() + 1);
        lines.push(slide.title.clone());
        lines.extend(
            slide
                .bullets
                .iter()
                .map(|bullet| format!("{}{}", self.bullet_marker, bullet)),
        );
        lines.join("\n")
    }
}
