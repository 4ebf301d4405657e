//! Domain types for raw deck content and structured slides.

use crate::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Raw, unstructured deck content as submitted by a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawContent {
    /// Slide-by-slide drafts, in presentation order.
    Slides(Vec<SlideDraft>),
    /// Flat mapping of field name to free text.
    Fields(BTreeMap<String, String>),
}

impl RawContent {
    /// Build raw content from a JSON value.
    ///
    /// An object with a `"slides"` key is read as slide drafts; any other
    /// object is read as a flat field mapping. Non-string field values are
    /// coerced to text (see [`value_text`]).
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::MalformedInput(format!("expected a JSON object, found {}", kind_of(value)))
        })?;

        if let Some(slides) = object.get("slides") {
            let slides = slides.as_array().ok_or_else(|| {
                Error::MalformedInput(format!(
                    "\"slides\" must be an array, found {}",
                    kind_of(slides)
                ))
            })?;

            let drafts = slides
                .iter()
                .enumerate()
                .map(|(idx, slide)| SlideDraft::from_value(slide, idx))
                .collect::<Result<Vec<_>>>()?;

            return Ok(Self::Slides(drafts));
        }

        let fields = object
            .iter()
            .map(|(key, value)| (key.clone(), value_text(value)))
            .collect();

        Ok(Self::Fields(fields))
    }

    /// Build flat field content from name/text pairs.
    pub fn fields<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fields(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One slide as drafted by the team, before structuring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDraft {
    /// Slide title. A positional default is used when absent.
    #[serde(default)]
    pub title: Option<String>,

    /// Free-text slide body.
    #[serde(default)]
    pub content: String,
}

impl SlideDraft {
    /// Create a draft with a title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: content.into(),
        }
    }

    fn from_value(value: &Value, index: usize) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::MalformedInput(format!(
                "slide {} must be an object, found {}",
                index + 1,
                kind_of(value)
            ))
        })?;

        let title = match object.get("title") {
            None | Some(Value::Null) => None,
            Some(title) => Some(value_text(title)),
        };
        let content = object.get("content").map(value_text).unwrap_or_default();

        Ok(Self { title, content })
    }
}

/// Render a JSON value as slide text.
///
/// Strings are used verbatim, `null` becomes empty, and everything else is
/// rendered as compact JSON (`42`, `true`, `["a","b"]`).
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A slide ready for rendering: a title and a short list of bullets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredSlide {
    /// Display title.
    pub title: String,

    /// Bullet points in display order. Never empty.
    pub bullets: Vec<String>,
}

impl StructuredSlide {
    /// Create a structured slide.
    pub fn new(title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            title: title.into(),
            bullets,
        }
    }
}

/// Ordered mapping of slide key to structured slide.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredDeck {
    entries: Vec<(String, StructuredSlide)>,
}

impl StructuredDeck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slide under the given key.
    ///
    /// A key that is already present is replaced in place.
    pub fn insert(&mut self, key: impl Into<String>, slide: StructuredSlide) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = slide,
            None => self.entries.push((key, slide)),
        }
    }

    /// Look up a slide by key.
    pub fn get(&self, key: &str) -> Option<&StructuredSlide> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, slide)| slide)
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slide keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, slide)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StructuredSlide)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }
}

impl Serialize for StructuredDeck {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, slide) in &self.entries {
            map.serialize_entry(key, slide)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StructuredDeck {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DeckVisitor;

        impl<'de> Visitor<'de> for DeckVisitor {
            type Value = StructuredDeck;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of slide keys to {title, bullets}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut deck = StructuredDeck::new();
                while let Some((key, slide)) = access.next_entry::<String, StructuredSlide>()? {
                    deck.insert(key, slide);
                }
                Ok(deck)
            }
        }

        deserializer.deserialize_map(DeckVisitor)
    }
}

/// Text substituted when a slide yields no usable bullets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// "Details pending team synthesis..."
    DetailsPending,
    /// "Data points pending submission..."
    #[default]
    DataPointsPending,
}

impl Placeholder {
    /// The placeholder bullet text.
    pub fn text(self) -> &'static str {
        match self {
            Self::DetailsPending => "Details pending team synthesis...",
            Self::DataPointsPending => "Data points pending submission...",
        }
    }
}

/// Team details shown on the title slide of a rendered deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckMeta {
    /// Team name.
    pub team_name: String,

    /// Institution the team represents.
    #[serde(default)]
    pub college_name: String,

    /// Team leader, if known.
    #[serde(default, alias = "leaderName")]
    pub leader_name: Option<String>,

    /// Comma-separated member names, if known.
    #[serde(default, alias = "memberNames")]
    pub member_names: Option<String>,
}

impl DeckMeta {
    /// Create metadata for a team.
    pub fn new(team_name: impl Into<String>, college_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            college_name: college_name.into(),
            leader_name: None,
            member_names: None,
        }
    }
}
