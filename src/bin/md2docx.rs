//! CLI binary for md2docx.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `StyleConfig` / `NotesLayout` and prints results.

use anyhow::{bail, Context, Result};
use clap::Parser;
use md2docx::convert::read_markdown;
use md2docx::{
    assemble_notes, convert_to_file, parse, read_pages, BlankLines, DocumentEmitter, JsonEmitter,
    NotesLayout, PageSeparator, StyleConfig,
};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert one file (writes notes.docx next to it)
  md2docx notes.md

  # Explicit output path
  md2docx notes.md -o out/lecture.docx

  # Assemble page transcripts into one document
  md2docx page1.md page2.md page3.md -o lecture.docx --title "Biochemistry 101"

  # Keep blank lines as empty paragraphs
  md2docx --blank-lines preserve notes.md

  # Custom styling (any subset of fields)
  md2docx --style style.json notes.md

  # Inspect the block model instead of writing .docx
  md2docx --json notes.md

STYLE FILE (JSON, every field optional):
  {
    "heading_sizes": [16.0, 14.0, 12.0],
    "paragraph_size": 11.0,
    "bullets": [{ "glyph": "•", "size_pt": 10.0 }, { "glyph": "➢", "size_pt": 10.0 }],
    "indent_step_cm": 0.5,
    "first_line_indent_cm": -0.25,
    "spaces_per_level": 4,
    "max_marker_indent": 8,
    "blank_lines": "drop"
  }

ENVIRONMENT VARIABLES:
  RUST_LOG                Override log filter (e.g. md2docx=debug)
  MD2DOCX_*               Every flag can also be set via its env var
"#;

/// Convert model-generated Markdown notes into styled Word documents.
#[derive(Parser, Debug)]
#[command(
    name = "md2docx",
    version,
    about = "Convert model-generated Markdown notes into styled Word documents",
    long_about = "Convert loosely-formed Markdown (headings, nested bullets, inline bold) into a \
styled .docx document. Stray bold delimiters left behind by language models are repaired \
before conversion. Several inputs are assembled as pages of one notes document.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown input file(s). Several files are treated as consecutive pages.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write the .docx to this path (default: first input with .docx extension).
    #[arg(short, long, env = "MD2DOCX_OUTPUT")]
    output: Option<PathBuf>,

    /// JSON style file overriding sizes, glyphs and indents.
    #[arg(long, env = "MD2DOCX_STYLE")]
    style: Option<PathBuf>,

    /// What blank source lines become: drop or preserve.
    #[arg(long, env = "MD2DOCX_BLANK_LINES", value_enum)]
    blank_lines: Option<BlankLinesArg>,

    /// Assemble inputs as notes pages even when there is only one.
    #[arg(long, env = "MD2DOCX_PAGES")]
    pages: bool,

    /// Title heading of assembled notes.
    #[arg(long, env = "MD2DOCX_TITLE", default_value = "Lecture Notes")]
    title: String,

    /// Separator after each page: none, hr, or a custom line.
    #[arg(long, env = "MD2DOCX_SEPARATOR", default_value = "hr")]
    separator: String,

    /// Also save the assembled Markdown to this path.
    #[arg(long, env = "MD2DOCX_MARKDOWN_OUT")]
    markdown_out: Option<PathBuf>,

    /// Print the block model as JSON to stdout instead of writing .docx.
    #[arg(long, env = "MD2DOCX_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2DOCX_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum BlankLinesArg {
    Drop,
    Preserve,
}

impl From<BlankLinesArg> for BlankLines {
    fn from(v: BlankLinesArg) -> Self {
        match v {
            BlankLinesArg::Drop => BlankLines::Drop,
            BlankLinesArg::Preserve => BlankLines::Preserve,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let style = build_style(&cli)?;

    // ── Collect Markdown ─────────────────────────────────────────────────
    let markdown = if cli.inputs.len() > 1 || cli.pages {
        let layout = NotesLayout {
            title: cli.title.clone(),
            separator: parse_separator(&cli.separator),
            ..NotesLayout::default()
        };
        let pages = read_pages(&cli.inputs);
        let failed = pages.iter().filter(|p| !p.is_ok()).count();
        if failed == pages.len() {
            let first = pages
                .iter()
                .find_map(|p| p.error.as_ref())
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            bail!("All {} pages failed.\nFirst error: {}", pages.len(), first);
        }
        if failed > 0 {
            warn!("{}/{} pages replaced by placeholders", failed, pages.len());
        }
        info!("Assembled {} pages into notes", pages.len());
        assemble_notes(&pages, &layout)
    } else {
        read_markdown(&cli.inputs[0]).context("Failed to read input")?
    };

    if let Some(ref path) = cli.markdown_out {
        std::fs::write(path, &markdown)
            .with_context(|| format!("Failed to write Markdown to {:?}", path))?;
        if !cli.quiet {
            eprintln!("{} Markdown saved to {}", dim("·"), path.display());
        }
    }

    // ── JSON mode ────────────────────────────────────────────────────────
    if cli.json {
        let document = parse(&markdown, &style);
        JsonEmitter::new(io::stdout().lock())
            .emit(&document)
            .context("Failed to write JSON")?;
        return Ok(());
    }

    // ── Write .docx ──────────────────────────────────────────────────────
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.inputs[0].with_extension("docx"));

    let stats = convert_to_file(&markdown, &output_path, &style).context("Conversion failed")?;

    if !cli.quiet {
        eprintln!(
            "{}  {} blocks  {}ms  →  {}",
            if stats.blocks > 0 { green("✔") } else { cyan("⚠") },
            stats.blocks,
            stats.total_duration_ms,
            bold(&output_path.display().to_string()),
        );
        eprintln!(
            "   {}",
            dim(&format!(
                "{} headings / {} list items / {} paragraphs",
                stats.headings, stats.list_items, stats.paragraphs
            )),
        );
    }

    Ok(())
}

/// Map CLI args to `StyleConfig`.
fn build_style(cli: &Cli) -> Result<StyleConfig> {
    let mut style = match cli.style {
        Some(ref path) => StyleConfig::from_json_file(path)
            .with_context(|| format!("Failed to load style from {:?}", path))?,
        None => StyleConfig::default(),
    };
    if let Some(ref policy) = cli.blank_lines {
        style.blank_lines = policy.clone().into();
    }
    Ok(style)
}

/// Parse `--separator` string into `PageSeparator`.
fn parse_separator(s: &str) -> PageSeparator {
    match s.to_lowercase().as_str() {
        "none" => PageSeparator::None,
        "hr" | "---" => PageSeparator::HorizontalRule,
        _ => PageSeparator::Custom(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_parsing() {
        assert_eq!(parse_separator("none"), PageSeparator::None);
        assert_eq!(parse_separator("HR"), PageSeparator::HorizontalRule);
        assert_eq!(parse_separator("---"), PageSeparator::HorizontalRule);
        assert_eq!(
            parse_separator("* * *"),
            PageSeparator::Custom("* * *".into())
        );
    }

    #[test]
    fn cli_parses_multiple_inputs() {
        let cli = Cli::try_parse_from(["md2docx", "a.md", "b.md", "-o", "out.docx"]).unwrap();
        assert_eq!(cli.inputs.len(), 2);
        assert_eq!(cli.output, Some(PathBuf::from("out.docx")));
        assert_eq!(cli.separator, "hr");
    }

    #[test]
    fn blank_lines_flag_overrides_style() {
        let cli =
            Cli::try_parse_from(["md2docx", "--blank-lines", "preserve", "a.md"]).unwrap();
        let style = build_style(&cli).unwrap();
        assert_eq!(style.blank_lines, BlankLines::Preserve);
    }
}
