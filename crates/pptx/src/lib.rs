//! PPTX (Office Open XML) writer backend for pitch decks.
//!
//! Renders a structured deck as a ZIP archive of PresentationML parts.

pub mod parts;
pub mod writer;

pub use writer::{artifact_file_name, DeckKind, PptxWriter};
