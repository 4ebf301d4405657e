//! CLI tool for structuring pitch deck content.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use deck_core::{
    ContentStructurer, DeckMeta, DeckRequest, FieldSchema, OutlineFormatter, Placeholder,
    SegmentationMode, StructuredDeck,
};
use deck_pptx::{artifact_file_name, DeckKind, PptxWriter};
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Turn raw pitch deck content into structured slides.
#[derive(Parser, Debug)]
#[command(name = "deck-structure")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input JSON file(s): a {"kind", "data"} request or bare content
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Placeholder for slides without usable content
    #[arg(long, value_enum, default_value_t = PlaceholderArg::Data)]
    placeholder: PlaceholderArg,

    /// Comma-separated field names for flat content (default: built-in list)
    #[arg(long, value_delimiter = ',')]
    fields: Option<Vec<String>>,

    /// Use sentence-aware splitting instead of the compatible splitter
    #[arg(long)]
    sentence: bool,

    /// Maximum bullets per drafted slide
    #[arg(long, default_value = "6")]
    slide_bullets: usize,

    /// Maximum bullets per named field
    #[arg(long, default_value = "5")]
    field_bullets: usize,

    /// Treat bare input as expert questionnaire answers
    #[arg(long)]
    expert: bool,

    /// Team name for the title slide (default: input file stem)
    #[arg(long)]
    team: Option<String>,

    /// Institution name for the title slide
    #[arg(long, default_value = "")]
    college: String,

    /// Event banner for the title slide
    #[arg(long)]
    event: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Structured slides as JSON
    Json,
    /// Plain-text outline
    Outline,
    /// PowerPoint package
    Pptx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlaceholderArg {
    /// "Data points pending submission..."
    Data,
    /// "Details pending team synthesis..."
    Details,
}

impl From<PlaceholderArg> for Placeholder {
    fn from(arg: PlaceholderArg) -> Self {
        match arg {
            PlaceholderArg::Data => Placeholder::DataPointsPending,
            PlaceholderArg::Details => Placeholder::DetailsPending,
        }
    }
}

/// A processed input, ready to print or write.
enum Rendered {
    Text(String),
    Package {
        meta: DeckMeta,
        deck: StructuredDeck,
        kind: DeckKind,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.print && args.format == OutputFormat::Pptx {
        bail!("--print cannot be combined with --format pptx");
    }

    let structurer = build_structurer(&args);
    let writer = match &args.event {
        Some(event) => PptxWriter::new().with_event_name(event),
        None => PptxWriter::new(),
    };

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &structurer) {
            Ok(Rendered::Text(output)) => {
                if args.print {
                    print!("{}", output);
                } else {
                    let output_path = get_output_path(
                        input_path,
                        args.output.as_ref(),
                        &text_output_name(input_path, args.format),
                    )?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Ok(Rendered::Package { meta, deck, kind }) => {
                let output_path = get_output_path(
                    input_path,
                    args.output.as_ref(),
                    &artifact_file_name(&meta, kind),
                )?;
                match writer.write_to_path(&meta, &deck, &output_path) {
                    Ok(()) => {
                        if args.verbose {
                            eprintln!("Written to: {}", output_path.display());
                        }
                    }
                    Err(e) => {
                        eprintln!("Error writing {}: {}", output_path.display(), e);
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Configure the structurer from command-line flags.
fn build_structurer(args: &Args) -> ContentStructurer {
    let mut structurer = ContentStructurer::new()
        .with_placeholder(args.placeholder.into())
        .with_slide_bullet_cap(args.slide_bullets)
        .with_field_bullet_cap(args.field_bullets);

    if args.sentence {
        structurer = structurer.with_segmentation(SegmentationMode::Sentence);
    }
    if let Some(fields) = &args.fields {
        let names = fields.iter().map(|f| f.trim()).filter(|f| !f.is_empty());
        structurer = structurer.with_schema(FieldSchema::from_names(names));
    }

    structurer
}

/// Process a single content file.
fn process_file(input_path: &Path, args: &Args, structurer: &ContentStructurer) -> Result<Rendered> {
    let text = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;
    let value: Value = serde_json::from_str(&text).with_context(|| "Input is not valid JSON")?;

    let request = parse_request(value, args.expert)?;
    let deck = request.into_deck(structurer)?;

    if args.verbose {
        eprintln!("  Structured {} slides", deck.len());
    }

    match args.format {
        OutputFormat::Json => {
            let mut output = serde_json::to_string_pretty(&deck)?;
            output.push('\n');
            Ok(Rendered::Text(output))
        }
        OutputFormat::Outline => Ok(Rendered::Text(
            OutlineFormatter::new().format_with_newline(&deck),
        )),
        OutputFormat::Pptx => {
            let team = args
                .team
                .clone()
                .unwrap_or_else(|| file_stem(input_path).to_string());
            let kind = if request.is_expert() {
                DeckKind::Expert
            } else {
                DeckKind::Standard
            };
            Ok(Rendered::Package {
                meta: DeckMeta::new(team, args.college.clone()),
                deck,
                kind,
            })
        }
    }
}

/// Interpret input JSON as a deck request.
///
/// An object carrying a `kind` tag is a full request; anything else is bare
/// content whose format is chosen by `--expert`.
fn parse_request(value: Value, expert: bool) -> Result<DeckRequest> {
    let tagged = value.as_object().is_some_and(|o| o.contains_key("kind"));

    let request = if tagged {
        serde_json::from_value(value).with_context(|| "Invalid deck request")?
    } else if expert {
        DeckRequest::Expert(
            serde_json::from_value(value).with_context(|| "Invalid expert project data")?,
        )
    } else {
        DeckRequest::Standard(value)
    };

    Ok(request)
}

fn file_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
}

/// File name for text output: `<stem>.deck.json` or `<stem>.outline.txt`.
///
/// The extra suffix keeps a `<stem>.json` input from being overwritten.
fn text_output_name(input_path: &Path, format: OutputFormat) -> String {
    let suffix = match format {
        OutputFormat::Outline => "outline.txt",
        _ => "deck.json",
    };
    format!("{}.{}", file_stem(input_path), suffix)
}

/// Determine the output path for a processed file.
///
/// Fails rather than returning the input path itself.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    output_filename: &str,
) -> Result<PathBuf> {
    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    if output_path == input_path {
        bail!(
            "Refusing to overwrite input file {}",
            input_path.display()
        );
    }

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
