//! Splitting free text into bullet-sized fragments.
//!
//! The default mode normalizes newlines and semicolons to `". "` and splits
//! on that literal, which is what existing slide layouts expect. A
//! sentence-aware mode is available for callers that want fewer bad splits.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Fragments with this many characters or fewer are dropped as noise.
pub const MIN_FRAGMENT_CHARS: usize = 5;

/// The delimiter every separator is normalized to in compatible mode.
const COMPAT_DELIMITER: &str = ". ";

/// Regex matching candidate sentence boundaries.
static BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n|;|[.!?]+\s+").unwrap());

/// Regex matching dotted initialisms without the final period ("U.S", "e.g").
static INITIALISM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z]\.)+[A-Za-z]$").unwrap());

/// Words that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &["etc", "vs", "dr", "mr", "mrs", "inc", "approx", "dept"];

/// How text is broken into fragments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMode {
    /// Newlines and semicolons become `". "`, then split on `". "`.
    #[default]
    Compatible,
    /// Split on newlines, semicolons, and terminal punctuation followed by
    /// whitespace, skipping periods after abbreviations and initialisms.
    Sentence,
}

/// Breaks free text into trimmed, non-trivial fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Segmenter {
    mode: SegmentationMode,
}

impl Segmenter {
    /// Create a segmenter using the given mode.
    pub fn new(mode: SegmentationMode) -> Self {
        Self { mode }
    }

    /// The mode this segmenter uses.
    pub fn mode(&self) -> SegmentationMode {
        self.mode
    }

    /// Split text into raw fragments, without trimming or filtering.
    pub fn split(&self, text: &str) -> Vec<String> {
        match self.mode {
            SegmentationMode::Compatible => split_compatible(text),
            SegmentationMode::Sentence => split_sentences(text),
        }
    }

    /// Split text and keep only trimmed fragments longer than
    /// [`MIN_FRAGMENT_CHARS`], in original order.
    pub fn fragments(&self, text: &str) -> Vec<String> {
        self.split(text)
            .iter()
            .filter_map(|fragment| {
                let trimmed = fragment.trim();
                if trimmed.chars().count() > MIN_FRAGMENT_CHARS {
                    Some(trimmed.to_string())
                } else {
                    if !trimmed.is_empty() {
                        log::trace!("Dropping short fragment {:?}", trimmed);
                    }
                    None
                }
            })
            .collect()
    }
}

fn split_compatible(text: &str) -> Vec<String> {
    text.replace('\n', COMPAT_DELIMITER)
        .replace(';', COMPAT_DELIMITER)
        .split(COMPAT_DELIMITER)
        .map(str::to_string)
        .collect()
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut start = 0;

    for boundary in BOUNDARY_REGEX.find_iter(text) {
        let punctuation = boundary.as_str().trim_end();
        if punctuation == "." && ends_with_abbreviation(&text[start..boundary.start()]) {
            continue;
        }

        // Keep terminal "!" and "?" with their sentence; periods are dropped
        // to match the compatible output.
        let end = if punctuation.starts_with(['!', '?']) {
            boundary.start() + punctuation.len()
        } else {
            boundary.start()
        };

        fragments.push(text[start..end].to_string());
        start = boundary.end();
    }

    fragments.push(text[start..].to_string());
    fragments
}

/// Check whether the last word of `text` is an abbreviation whose period
/// should not end the sentence.
fn ends_with_abbreviation(text: &str) -> bool {
    let Some(word) = text.split_whitespace().last() else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());

    if INITIALISM_REGEX.is_match(word) {
        return true;
    }

    // Single-letter initials ("J. Smith")
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_uppercase() {
            return true;
        }
    }

    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}
