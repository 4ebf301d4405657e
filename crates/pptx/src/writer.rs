//! PPTX file writer implementation.

use crate::parts;
use deck_core::{DeckMeta, Error, Result, StructuredDeck, StructuredSlide};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// English Metric Units per inch.
const EMU_PER_INCH: f64 = 914_400.0;

/// Deck entry whose first bullet labels the title slide.
const TITLE_KEY: &str = "title";

/// Which generator produced the deck, used for output naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckKind {
    /// Deck structured from free text.
    Standard,
    /// Deck synthesized from expert questionnaire answers.
    Expert,
}

/// File name for a rendered deck.
///
/// Standard decks are `<team>_pitch_artifact.pptx` with the team name
/// lowercased; expert decks are `<Team>_expert_pitch.pptx`. Spaces and path
/// separators become underscores in both.
pub fn artifact_file_name(meta: &DeckMeta, kind: DeckKind) -> String {
    let team: String = meta
        .team_name
        .chars()
        .map(|c| if c == ' ' || c == '/' || c == '\\' { '_' } else { c })
        .collect();

    match kind {
        DeckKind::Standard => format!("{}_pitch_artifact.pptx", team.to_lowercase()),
        DeckKind::Expert => format!("{}_expert_pitch.pptx", team),
    }
}

fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// A single paragraph of a text box.
#[derive(Debug, Clone)]
struct Paragraph {
    text: String,
    /// Font size in points.
    size: u32,
    bold: bool,
    italic: bool,
    align: Align,
    bullet: bool,
}

impl Paragraph {
    fn new(text: impl Into<String>, size: u32) -> Self {
        Self {
            text: text.into(),
            size,
            bold: false,
            italic: false,
            align: Align::Center,
            bullet: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn bullet(mut self) -> Self {
        self.bullet = true;
        self.align = Align::Left;
        self
    }
}

/// A positioned text box on a slide. Coordinates are in inches.
#[derive(Debug, Clone)]
struct TextBox {
    name: &'static str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    outlined: bool,
    paragraphs: Vec<Paragraph>,
}

impl TextBox {
    fn new(name: &'static str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name,
            x,
            y,
            width,
            height,
            outlined: false,
            paragraphs: Vec::new(),
        }
    }

    fn outlined(mut self) -> Self {
        self.outlined = true;
        self
    }

    fn with(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }
}

/// Writer for PPTX (Office Open XML) pitch decks.
///
/// The first slide is a title slide built from [`DeckMeta`] and the deck's
/// `title` entry; every other deck entry becomes one bullet slide, in
/// deck order.
#[derive(Debug, Clone)]
pub struct PptxWriter {
    /// Optional event banner shown above the project name.
    event_name: Option<String>,
    /// Slide width in EMU.
    width: i64,
    /// Slide height in EMU.
    height: i64,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self {
            event_name: None,
            width: inches(10.0),
            height: inches(7.5),
        }
    }
}

impl PptxWriter {
    /// Create a writer for 10" x 7.5" slides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an event banner on the title slide.
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    /// Write a deck to a file, creating or truncating it.
    pub fn write_to_path(&self, meta: &DeckMeta, deck: &StructuredDeck, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = self.write(meta, deck, BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }

    /// Write a deck as a PPTX package, returning the underlying writer.
    pub fn write<W: Write + Seek>(
        &self,
        meta: &DeckMeta,
        deck: &StructuredDeck,
        writer: W,
    ) -> Result<W> {
        let mut slides = vec![self.title_slide_xml(meta, deck)?];
        for (key, slide) in deck.iter() {
            if key == TITLE_KEY {
                continue;
            }
            slides.push(content_slide_xml(slide)?);
        }
        log::debug!("Writing PPTX with {} slides", slides.len());

        let mut zip = ZipWriter::new(writer);
        let count = slides.len();

        add_part(&mut zip, parts::CONTENT_TYPES_PATH, &parts::content_types(count))?;
        add_part(&mut zip, parts::ROOT_RELS_PATH, &parts::root_rels())?;
        add_part(
            &mut zip,
            parts::PRESENTATION_PATH,
            &parts::presentation(count, self.width, self.height),
        )?;
        add_part(&mut zip, parts::PRESENTATION_RELS_PATH, &parts::presentation_rels(count))?;
        add_part(&mut zip, parts::SLIDE_MASTER_PATH, &parts::slide_master())?;
        add_part(&mut zip, parts::SLIDE_MASTER_RELS_PATH, &parts::slide_master_rels())?;
        add_part(&mut zip, parts::SLIDE_LAYOUT_PATH, &parts::slide_layout())?;
        add_part(&mut zip, parts::SLIDE_LAYOUT_RELS_PATH, &parts::slide_layout_rels())?;
        add_part(&mut zip, parts::THEME_PATH, &parts::theme())?;

        let slide_rels = parts::slide_rels();
        for (idx, xml) in slides.iter().enumerate() {
            add_part(&mut zip, &parts::slide_path(idx + 1), xml)?;
            add_part(&mut zip, &parts::slide_rels_path(idx + 1), &slide_rels)?;
        }

        zip.finish()
            .map_err(|e| Error::Zip(format!("Failed to finish archive: {}", e)))
    }

    /// Build the title slide: event banner, project name, and team details.
    fn title_slide_xml(&self, meta: &DeckMeta, deck: &StructuredDeck) -> Result<String> {
        let project = deck
            .get(TITLE_KEY)
            .and_then(|slide| slide.bullets.first())
            .map(|label| label.to_uppercase())
            .unwrap_or_else(|| "PROJECT NAME".to_string());

        let mut boxes = Vec::new();

        if let Some(event) = &self.event_name {
            boxes.push(
                TextBox::new("Event", 1.0, 1.6, 8.0, 1.0).with(Paragraph::new(event, 44).bold()),
            );
        }

        boxes.push(TextBox::new("Project", 1.0, 3.8, 8.0, 0.8).with(Paragraph::new(project, 32).bold()));

        let mut team = TextBox::new("Team", 1.5, 5.0, 7.0, 2.5).with(
            Paragraph::new(format!("TEAM {}", meta.team_name.to_uppercase()), 20).bold(),
        );
        if !meta.college_name.trim().is_empty() {
            team = team.with(
                Paragraph::new(format!("from {}", meta.college_name.to_uppercase()), 14).italic(),
            );
        }
        if let Some(leader) = &meta.leader_name {
            team = team.with(
                Paragraph::new(format!("Team Leader: {}", leader.to_uppercase()), 16).bold(),
            );
        }
        if let Some(members) = &meta.member_names {
            team = team.with(Paragraph::new(format!("MEMBERS: {}", members.to_uppercase()), 12));
        }
        boxes.push(team);

        slide_xml(&boxes)
    }
}

/// Build a bullet slide: centered title above an outlined bullet box.
fn content_slide_xml(slide: &StructuredSlide) -> Result<String> {
    let title = TextBox::new("Title", 0.5, 0.6, 9.0, 0.8).with(Paragraph::new(&slide.title, 28).bold());

    let body = slide
        .bullets
        .iter()
        .fold(TextBox::new("Content", 0.8, 1.6, 8.4, 5.2).outlined(), |body, bullet| {
            body.with(Paragraph::new(bullet, 22).bullet())
        });

    slide_xml(&[title, body])
}

fn xml_error(e: impl std::fmt::Display) -> Error {
    Error::Xml(format!("Failed to write slide XML: {}", e))
}

/// Serialize a slide containing the given text boxes.
fn slide_xml(boxes: &[TextBox]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("p:sld").with_attributes([
            ("xmlns:a", parts::NS_A),
            ("xmlns:r", parts::NS_R),
            ("xmlns:p", parts::NS_P),
        ])))
        .map_err(xml_error)?;
    start(&mut writer, "p:cSld")?;
    start(&mut writer, "p:spTree")?;

    start(&mut writer, "p:nvGrpSpPr")?;
    empty(&mut writer, "p:cNvPr", &[("id", "1"), ("name", "")])?;
    empty(&mut writer, "p:cNvGrpSpPr", &[])?;
    empty(&mut writer, "p:nvPr", &[])?;
    end(&mut writer, "p:nvGrpSpPr")?;
    empty(&mut writer, "p:grpSpPr", &[])?;

    for (idx, text_box) in boxes.iter().enumerate() {
        write_text_box(&mut writer, idx + 2, text_box)?;
    }

    end(&mut writer, "p:spTree")?;
    end(&mut writer, "p:cSld")?;
    start(&mut writer, "p:clrMapOvr")?;
    empty(&mut writer, "a:masterClrMapping", &[])?;
    end(&mut writer, "p:clrMapOvr")?;
    end(&mut writer, "p:sld")?;

    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn write_text_box(writer: &mut Writer<Vec<u8>>, id: usize, text_box: &TextBox) -> Result<()> {
    let id = id.to_string();
    let (x, y) = (inches(text_box.x).to_string(), inches(text_box.y).to_string());
    let (cx, cy) = (
        inches(text_box.width).to_string(),
        inches(text_box.height).to_string(),
    );

    start(writer, "p:sp")?;

    start(writer, "p:nvSpPr")?;
    empty(writer, "p:cNvPr", &[("id", id.as_str()), ("name", text_box.name)])?;
    empty(writer, "p:cNvSpPr", &[("txBox", "1")])?;
    empty(writer, "p:nvPr", &[])?;
    end(writer, "p:nvSpPr")?;

    start(writer, "p:spPr")?;
    start(writer, "a:xfrm")?;
    empty(writer, "a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
    empty(writer, "a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    end(writer, "a:xfrm")?;
    start_with(writer, "a:prstGeom", &[("prst", "rect")])?;
    empty(writer, "a:avLst", &[])?;
    end(writer, "a:prstGeom")?;
    empty(writer, "a:noFill", &[])?;
    if text_box.outlined {
        start_with(writer, "a:ln", &[("w", "19050")])?;
        start(writer, "a:solidFill")?;
        empty(writer, "a:schemeClr", &[("val", "accent1")])?;
        end(writer, "a:solidFill")?;
        end(writer, "a:ln")?;
    }
    end(writer, "p:spPr")?;

    start(writer, "p:txBody")?;
    empty(
        writer,
        "a:bodyPr",
        &[("wrap", "square"), ("lIns", "182880"), ("tIns", "182880")],
    )?;
    empty(writer, "a:lstStyle", &[])?;
    for paragraph in &text_box.paragraphs {
        write_paragraph(writer, paragraph)?;
    }
    end(writer, "p:txBody")?;

    end(writer, "p:sp")
}

fn write_paragraph(writer: &mut Writer<Vec<u8>>, paragraph: &Paragraph) -> Result<()> {
    start(writer, "a:p")?;

    let align = match paragraph.align {
        Align::Left => "l",
        Align::Center => "ctr",
    };
    if paragraph.bullet {
        start_with(
            writer,
            "a:pPr",
            &[("marL", "342900"), ("indent", "-342900"), ("algn", align)],
        )?;
        start(writer, "a:spcAft")?;
        empty(writer, "a:spcPts", &[("val", "1200")])?;
        end(writer, "a:spcAft")?;
        empty(writer, "a:buFont", &[("typeface", "Arial")])?;
        empty(writer, "a:buChar", &[("char", "\u{2022}")])?;
        end(writer, "a:pPr")?;
    } else {
        empty(writer, "a:pPr", &[("algn", align)])?;
    }

    start(writer, "a:r")?;
    let size = (paragraph.size * 100).to_string();
    let mut run_props = vec![("lang", "en-US"), ("sz", size.as_str())];
    if paragraph.bold {
        run_props.push(("b", "1"));
    }
    if paragraph.italic {
        run_props.push(("i", "1"));
    }
    empty(writer, "a:rPr", &run_props)?;
    start(writer, "a:t")?;
    writer
        .write_event(Event::Text(BytesText::new(&paragraph.text)))
        .map_err(xml_error)?;
    end(writer, "a:t")?;
    end(writer, "a:r")?;

    end(writer, "a:p")
}

fn start(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    start_with(writer, name, &[])
}

fn start_with(writer: &mut Writer<Vec<u8>>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    writer
        .write_event(Event::Start(
            BytesStart::new(name).with_attributes(attrs.iter().copied()),
        ))
        .map_err(xml_error)
}

fn empty(writer: &mut Writer<Vec<u8>>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    writer
        .write_event(Event::Empty(
            BytesStart::new(name).with_attributes(attrs.iter().copied()),
        ))
        .map_err(xml_error)
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

fn add_part<W: Write + Seek>(zip: &mut ZipWriter<W>, path: &str, content: &str) -> Result<()> {
    zip.start_file(path, FileOptions::default().compression_method(CompressionMethod::Deflated))
        .map_err(|e| Error::Zip(format!("Failed to start '{}': {}", path, e)))?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn sample_deck() -> StructuredDeck {
        let mut deck = StructuredDeck::new();
        deck.insert(
            "title",
            StructuredSlide::new("Title", vec!["FloodWatch".to_string()]),
        );
        deck.insert(
            "problem",
            StructuredSlide::new(
                "Problem",
                vec![
                    "Villages get no warning".to_string(),
                    "Rivers rise & fall <fast>".to_string(),
                ],
            ),
        );
        deck.insert(
            "solution",
            StructuredSlide::new("Solution", vec!["Cheap river sensors".to_string()]),
        );
        deck
    }

    fn write_sample(meta: &DeckMeta) -> ZipArchive<Cursor<Vec<u8>>> {
        let cursor = PptxWriter::new()
            .write(meta, &sample_deck(), Cursor::new(Vec::new()))
            .unwrap();
        ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap()
    }

    fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, path: &str) -> String {
        let mut content = String::new();
        archive
            .by_name(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    /// Collect the text of every `a:t` run in a slide, in document order.
    fn slide_texts(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut in_text = false;
        let mut texts = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"a:t" => in_text = true,
                Ok(Event::End(ref e)) if e.name().as_ref() == b"a:t" => in_text = false,
                Ok(Event::Text(ref e)) if in_text => {
                    texts.push(e.unescape().unwrap().to_string());
                }
                Ok(Event::Eof) => break,
                Err(e) => panic!("invalid slide XML: {}", e),
                _ => {}
            }
        }

        texts
    }

    #[test]
    fn test_package_contains_required_parts() {
        let mut archive = write_sample(&DeckMeta::new("Byte Me", "JIT"));

        for path in [
            parts::CONTENT_TYPES_PATH,
            parts::ROOT_RELS_PATH,
            parts::PRESENTATION_PATH,
            parts::PRESENTATION_RELS_PATH,
            parts::SLIDE_MASTER_PATH,
            parts::SLIDE_LAYOUT_PATH,
            parts::THEME_PATH,
            "ppt/slides/slide1.xml",
            "ppt/slides/slide3.xml",
            "ppt/slides/_rels/slide3.xml.rels",
        ] {
            assert!(archive.by_name(path).is_ok(), "missing {}", path);
        }
        // Title entry feeds the title slide instead of getting its own.
        assert!(archive.by_name("ppt/slides/slide4.xml").is_err());
    }

    #[test]
    fn test_title_slide_text() {
        let mut meta = DeckMeta::new("Byte Me", "Jansons Institute");
        meta.leader_name = Some("Asha".to_string());
        let mut archive = write_sample(&meta);

        let texts = slide_texts(&read_part(&mut archive, "ppt/slides/slide1.xml"));
        assert_eq!(
            texts,
            vec![
                "FLOODWATCH",
                "TEAM BYTE ME",
                "from JANSONS INSTITUTE",
                "Team Leader: ASHA"
            ]
        );
    }

    #[test]
    fn test_content_slides_follow_deck_order() {
        let mut archive = write_sample(&DeckMeta::new("Byte Me", ""));

        let problem = slide_texts(&read_part(&mut archive, "ppt/slides/slide2.xml"));
        assert_eq!(
            problem,
            vec!["Problem", "Villages get no warning", "Rivers rise & fall <fast>"]
        );

        let solution = slide_texts(&read_part(&mut archive, "ppt/slides/slide3.xml"));
        assert_eq!(solution, vec!["Solution", "Cheap river sensors"]);
    }

    #[test]
    fn test_text_is_escaped() {
        let mut archive = write_sample(&DeckMeta::new("Byte Me", ""));
        let xml = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(xml.contains("Rivers rise &amp; fall &lt;fast&gt;"));
    }

    #[test]
    fn test_missing_title_entry_uses_default_label() {
        let mut deck = StructuredDeck::new();
        deck.insert("impact", StructuredSlide::new("Impact", vec!["Lives saved".to_string()]));
        let cursor = PptxWriter::new()
            .with_event_name("HACKATHON 2026")
            .write(&DeckMeta::new("Solo", ""), &deck, Cursor::new(Vec::new()))
            .unwrap();
        let mut archive = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();

        let texts = slide_texts(&read_part(&mut archive, "ppt/slides/slide1.xml"));
        assert_eq!(texts, vec!["HACKATHON 2026", "PROJECT NAME", "TEAM SOLO"]);
    }

    #[test]
    fn test_artifact_file_name() {
        let meta = DeckMeta::new("Byte Me", "");
        assert_eq!(
            artifact_file_name(&meta, DeckKind::Standard),
            "byte_me_pitch_artifact.pptx"
        );
        assert_eq!(
            artifact_file_name(&meta, DeckKind::Expert),
            "Byte_Me_expert_pitch.pptx"
        );
        assert_eq!(
            artifact_file_name(&DeckMeta::new("a/b", ""), DeckKind::Standard),
            "a_b_pitch_artifact.pptx"
        );
    }

    #[test]
    fn test_inches_to_emu() {
        assert_eq!(inches(1.0), 914_400);
        assert_eq!(inches(7.5), 6_858_000);
    }
}
