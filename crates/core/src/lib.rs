//! Core domain types, text segmentation, and bullet structuring
//! for pitch deck generation.

pub mod error;
pub mod expert;
pub mod outline;
pub mod request;
pub mod schema;
pub mod segment;
pub mod structure;
pub mod types;

pub use error::{Error, Result};
pub use expert::{synthesize_expert, ExpertProjectData};
pub use outline::OutlineFormatter;
pub use request::DeckRequest;
pub use schema::{FieldSchema, FieldSpec};
pub use segment::{SegmentationMode, Segmenter};
pub use structure::ContentStructurer;
pub use types::{DeckMeta, Placeholder, RawContent, SlideDraft, StructuredDeck, StructuredSlide};
