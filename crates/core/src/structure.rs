//! Turning raw deck content into titled, capped bullet lists.

use crate::schema::FieldSchema;
use crate::segment::{SegmentationMode, Segmenter};
use crate::types::{Placeholder, RawContent, SlideDraft, StructuredDeck, StructuredSlide};
use std::collections::BTreeMap;

/// Default maximum bullets on a slide drafted slide-by-slide.
pub const DEFAULT_SLIDE_BULLET_CAP: usize = 6;

/// Default maximum bullets on a slide built from a named field.
pub const DEFAULT_FIELD_BULLET_CAP: usize = 5;

/// Structures raw team content into slides of short bullet points.
///
/// Structuring never fails: missing fields and empty text fall back to a
/// single placeholder bullet.
#[derive(Debug, Clone)]
pub struct ContentStructurer {
    segmenter: Segmenter,
    schema: FieldSchema,
    placeholder: Placeholder,
    slide_bullet_cap: usize,
    field_bullet_cap: usize,
}

impl Default for ContentStructurer {
    fn default() -> Self {
        Self {
            segmenter: Segmenter::default(),
            schema: FieldSchema::default(),
            placeholder: Placeholder::default(),
            slide_bullet_cap: DEFAULT_SLIDE_BULLET_CAP,
            field_bullet_cap: DEFAULT_FIELD_BULLET_CAP,
        }
    }
}

impl ContentStructurer {
    /// Create a structurer with the default schema, caps, and placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder used for slides without usable content.
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set the fields read from flat content.
    pub fn with_schema(mut self, schema: FieldSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the bullet cap for slide-by-slide content.
    pub fn with_slide_bullet_cap(mut self, cap: usize) -> Self {
        self.slide_bullet_cap = cap.max(1);
        self
    }

    /// Set the bullet cap for flat field content.
    pub fn with_field_bullet_cap(mut self, cap: usize) -> Self {
        self.field_bullet_cap = cap.max(1);
        self
    }

    /// Set how text is split into fragments.
    pub fn with_segmentation(mut self, mode: SegmentationMode) -> Self {
        self.segmenter = Segmenter::new(mode);
        self
    }

    /// The configured field schema.
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// The configured placeholder.
    pub fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    /// Structure raw content into a deck.
    ///
    /// Slide drafts produce `slide_1..slide_N` in input order; flat content
    /// produces one slide per schema field, keyed by field name.
    pub fn structure(&self, raw: &RawContent) -> StructuredDeck {
        match raw {
            RawContent::Slides(drafts) => self.structure_slides(drafts),
            RawContent::Fields(fields) => self.structure_fields(fields),
        }
    }

    fn structure_slides(&self, drafts: &[SlideDraft]) -> StructuredDeck {
        let mut deck = StructuredDeck::new();

        for (idx, draft) in drafts.iter().enumerate() {
            let number = idx + 1;
            let title = draft
                .title
                .clone()
                .unwrap_or_else(|| format!("Slide {}", number));
            let bullets = self.bullets(&draft.content, self.slide_bullet_cap);

            log::debug!("slide_{}: {} bullet(s)", number, bullets.len());
            deck.insert(format!("slide_{}", number), StructuredSlide::new(title, bullets));
        }

        deck
    }

    fn structure_fields(&self, fields: &BTreeMap<String, String>) -> StructuredDeck {
        let mut deck = StructuredDeck::new();

        for field in self.schema.fields() {
            let text = fields.get(&field.name).map(String::as_str).unwrap_or("");
            let bullets = self.bullets(text, self.field_bullet_cap);

            log::debug!("{}: {} bullet(s)", field.name, bullets.len());
            deck.insert(
                field.name.clone(),
                StructuredSlide::new(field.label.clone(), bullets),
            );
        }

        let ignored = fields
            .keys()
            .filter(|key| !self.schema.fields().iter().any(|f| &f.name == *key))
            .count();
        if ignored > 0 {
            log::debug!("Ignored {} field(s) outside the schema", ignored);
        }

        deck
    }

    /// Segment text into at most `cap` bullets, or the placeholder.
    fn bullets(&self, text: &str, cap: usize) -> Vec<String> {
        let mut bullets = self.segmenter.fragments(text);
        bullets.truncate(cap);

        if bullets.is_empty() {
            log::debug!("No usable fragments, using placeholder");
            bullets.push(self.placeholder.text().to_string());
        }

        bullets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, DEFAULT_FIELDS};
    use serde_json::json;

    fn structure_json(structurer: &ContentStructurer, value: serde_json::Value) -> StructuredDeck {
        let raw = RawContent::from_value(&value).unwrap();
        structurer.structure(&raw)
    }

    #[test]
    fn test_flat_fields_split_on_periods_and_semicolons() {
        let deck = structure_json(
            &ContentStructurer::new(),
            json!({"problem": "Traffic is bad. Commute times rose; people are frustrated"}),
        );

        let problem = deck.get("problem").unwrap();
        assert_eq!(problem.title, "Problem");
        assert_eq!(
            problem.bullets,
            vec!["Traffic is bad", "Commute times rose", "people are frustrated"]
        );
    }

    #[test]
    fn test_short_text_uses_placeholder() {
        let deck = structure_json(&ContentStructurer::new(), json!({"problem": "Ok"}));
        assert_eq!(
            deck.get("problem").unwrap().bullets,
            vec!["Data points pending submission..."]
        );
    }

    #[test]
    fn test_slides_with_only_short_lines_use_placeholder() {
        let structurer = ContentStructurer::new().with_placeholder(Placeholder::DetailsPending);
        let deck = structure_json(
            &structurer,
            json!({"slides": [{"title": "Intro", "content": "A\nB\nC"}]}),
        );

        assert_eq!(deck.len(), 1);
        let slide = deck.get("slide_1").unwrap();
        assert_eq!(slide.title, "Intro");
        assert_eq!(slide.bullets, vec!["Details pending team synthesis..."]);
    }

    #[test]
    fn test_placeholder_is_consistent_across_forms() {
        let structurer = ContentStructurer::new();
        let slides = structure_json(&structurer, json!({"slides": [{"content": ""}]}));
        let fields = structure_json(&structurer, json!({}));

        assert_eq!(
            slides.get("slide_1").unwrap().bullets,
            fields.get("outcome").unwrap().bullets
        );
    }

    #[test]
    fn test_flat_output_has_every_schema_field_in_order() {
        let deck = structure_json(
            &ContentStructurer::new(),
            json!({"outcome": "Shipped a working pilot", "extra": "ignored entirely"}),
        );

        assert_eq!(deck.keys().collect::<Vec<_>>(), DEFAULT_FIELDS);
        assert!(deck.get("extra").is_none());
        assert_eq!(
            deck.get("outcome").unwrap().bullets,
            vec!["Shipped a working pilot"]
        );
    }

    #[test]
    fn test_absent_field_gets_label_and_placeholder() {
        let deck = structure_json(&ContentStructurer::new(), json!({"problem": "Something real"}));

        let architecture = deck.get("architecture").unwrap();
        assert_eq!(architecture.title, "Architecture");
        assert_eq!(architecture.bullets, vec![Placeholder::default().text()]);
    }

    #[test]
    fn test_slides_keep_input_order_and_default_titles() {
        let deck = structure_json(
            &ContentStructurer::new(),
            json!({"slides": [
                {"title": "Problem", "content": "Queues are far too long"},
                {"content": "We built a booking system"},
                {"title": "Team", "content": "Four engineers; one designer"}
            ]}),
        );

        assert_eq!(
            deck.keys().collect::<Vec<_>>(),
            vec!["slide_1", "slide_2", "slide_3"]
        );
        assert_eq!(deck.get("slide_2").unwrap().title, "Slide 2");
        assert_eq!(
            deck.get("slide_3").unwrap().bullets,
            vec!["Four engineers", "one designer"]
        );
    }

    #[test]
    fn test_empty_slides_list() {
        let deck = structure_json(&ContentStructurer::new(), json!({"slides": []}));
        assert!(deck.is_empty());
    }

    #[test]
    fn test_caps_take_first_fragments_in_order() {
        let text = (1..=20)
            .map(|i| format!("Point number {}", i))
            .collect::<Vec<_>>()
            .join(". ");
        let structurer = ContentStructurer::new();

        let slides = structure_json(&structurer, json!({"slides": [{"content": text}]}));
        let bullets = &slides.get("slide_1").unwrap().bullets;
        assert_eq!(bullets.len(), 6);
        assert_eq!(bullets[0], "Point number 1");
        assert_eq!(bullets[5], "Point number 6");

        let fields = structure_json(&structurer, json!({"impact": text}));
        let bullets = &fields.get("impact").unwrap().bullets;
        assert_eq!(bullets.len(), 5);
        assert_eq!(bullets[4], "Point number 5");
    }

    #[test]
    fn test_custom_caps() {
        let structurer = ContentStructurer::new()
            .with_field_bullet_cap(2)
            .with_slide_bullet_cap(0);
        let deck = structure_json(
            &structurer,
            json!({"slides": [{"content": "First point here. Second point here"}]}),
        );

        // A cap of zero is clamped to one.
        assert_eq!(deck.get("slide_1").unwrap().bullets, vec!["First point here"]);
    }

    #[test]
    fn test_custom_schema() {
        let schema = FieldSchema::new(vec![
            FieldSpec::new("team_story"),
            FieldSpec::with_label("ask", "The Ask"),
        ]);
        let structurer = ContentStructurer::new().with_schema(schema);
        let deck = structure_json(
            &structurer,
            json!({"team_story": "Met at a hackathon", "problem": "not in schema"}),
        );

        assert_eq!(deck.keys().collect::<Vec<_>>(), vec!["team_story", "ask"]);
        assert_eq!(deck.get("team_story").unwrap().title, "Team Story");
        assert_eq!(deck.get("ask").unwrap().title, "The Ask");
    }

    #[test]
    fn test_sentence_mode_changes_only_boundaries() {
        let structurer = ContentStructurer::new().with_segmentation(SegmentationMode::Sentence);
        let deck = structure_json(
            &structurer,
            json!({"solution": "Deployed across the U.S. within weeks. Costs fell"}),
        );

        assert_eq!(
            deck.get("solution").unwrap().bullets,
            vec!["Deployed across the U.S. within weeks", "Costs fell"]
        );
    }

    #[test]
    fn test_restructuring_output_keeps_bullets() {
        let structurer = ContentStructurer::new();
        let first = structure_json(
            &structurer,
            json!({"slides": [{"content": "Short. Longer idea one; Another longer idea\nTiny\nFinal thought here"}]}),
        );
        let bullets = first.get("slide_1").unwrap().bullets.clone();

        let second = structure_json(
            &structurer,
            json!({"slides": [{"content": bullets.join(". ")}]}),
        );
        assert_eq!(second.get("slide_1").unwrap().bullets, bullets);
    }

    #[test]
    fn test_non_string_values_are_coerced() {
        let deck = structure_json(&ContentStructurer::new(), json!({"impact": 1234567}));
        assert_eq!(deck.get("impact").unwrap().bullets, vec!["1234567"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let raw = RawContent::fields([("problem", "Something real happened")]);
        let before = raw.clone();
        let _ = ContentStructurer::new().structure(&raw);
        assert_eq!(raw, before);
    }
}
