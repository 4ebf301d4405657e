//! Explicitly tagged deck requests.

use crate::expert::{synthesize_expert, ExpertProjectData};
use crate::structure::ContentStructurer;
use crate::types::{RawContent, StructuredDeck};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A deck request whose content format is named by the caller.
///
/// Serialized as `{"kind": "standard" | "expert", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum DeckRequest {
    /// Free-text content, structured by segmentation.
    Standard(Value),
    /// Expert questionnaire answers, structured by templates.
    Expert(ExpertProjectData),
}

impl DeckRequest {
    /// Parse a request from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the structured deck for this request.
    pub fn into_deck(&self, structurer: &ContentStructurer) -> Result<StructuredDeck> {
        match self {
            Self::Standard(value) => {
                let raw = RawContent::from_value(value)?;
                Ok(structurer.structure(&raw))
            }
            Self::Expert(data) => Ok(synthesize_expert(data)),
        }
    }

    /// Whether this is an expert request.
    pub fn is_expert(&self) -> bool {
        matches!(self, Self::Expert(_))
    }
}
