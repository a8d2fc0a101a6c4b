//! Configuration types for Markdown-to-document conversion.
//!
//! Every styling decision the block builder makes is read from a
//! [`StyleConfig`] value passed in by the caller: heading sizes, bullet glyphs,
//! paragraph size, indentation metrics and the blank-line policy. There is no
//! process-wide style table, so two conversions with different styles can run
//! side by side.
//!
//! [`NotesLayout`] controls how several source pages are stitched into one
//! notes document before conversion (see [`crate::notes`]).

use crate::error::Md2DocxError;
use crate::model::ListIndent;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Styling applied by the block builder.
///
/// Built via [`StyleConfig::builder()`], loaded from JSON with
/// [`StyleConfig::from_json_file`], or taken as [`StyleConfig::default()`].
///
/// # Example
/// ```rust
/// use md2docx::{BlankLines, StyleConfig};
///
/// let style = StyleConfig::builder()
///     .paragraph_size(12.0)
///     .blank_lines(BlankLines::Preserve)
///     .build()
///     .unwrap();
/// assert_eq!(style.heading_size(1), 16.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Font sizes in points for heading levels 1, 2 and 3. Default: 16/14/12.
    pub heading_sizes: [f32; 3],

    /// Whether heading runs are forced bold. Default: true.
    pub heading_bold: bool,

    /// Bullet glyph and size per nesting level, level 1 first.
    ///
    /// The table length is also the deepest supported level; deeper items
    /// clamp to the last entry.
    pub bullets: Vec<BulletStyle>,

    /// Base font size of plain paragraphs. Default: 11.
    pub paragraph_size: f32,

    /// Left indent added per nesting level, in centimetres. Default: 0.5.
    pub indent_step_cm: f32,

    /// First-line indent of list items, in centimetres. Default: −0.25.
    pub first_line_indent_cm: f32,

    /// Leading spaces that make up one nesting level. Default: 4.
    pub spaces_per_level: usize,

    /// Deepest marker indentation still recognised as a list item. Default: 8.
    ///
    /// A `*`/`-` marker indented further than this is treated as paragraph
    /// text. Raise it to reach nesting levels 4 and 5 from source indentation.
    pub max_marker_indent: usize,

    /// What a whitespace-only source line turns into. Default: [`BlankLines::Drop`].
    pub blank_lines: BlankLines,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            heading_sizes: [16.0, 14.0, 12.0],
            heading_bold: true,
            bullets: vec![
                BulletStyle::new("•", 10.0),
                BulletStyle::new("➢", 10.0),
                BulletStyle::new("-", 10.0),
                BulletStyle::new("–", 10.0),
                BulletStyle::new("⁃", 10.0),
            ],
            paragraph_size: 11.0,
            indent_step_cm: 0.5,
            first_line_indent_cm: -0.25,
            spaces_per_level: 4,
            max_marker_indent: 8,
            blank_lines: BlankLines::default(),
        }
    }
}

impl StyleConfig {
    /// Create a new builder for `StyleConfig`.
    pub fn builder() -> StyleConfigBuilder {
        StyleConfigBuilder {
            config: Self::default(),
        }
    }

    /// Load a style from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Md2DocxError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Md2DocxError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Md2DocxError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            Md2DocxError::InvalidConfig(format!("style file '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Font size for a heading level; levels outside 1–3 use the level-3 size.
    pub fn heading_size(&self, level: u8) -> f32 {
        let idx = usize::from(level.clamp(1, 3)) - 1;
        self.heading_sizes[idx]
    }

    /// Deepest nesting level the bullet table supports.
    pub fn max_list_level(&self) -> u8 {
        u8::try_from(self.bullets.len()).unwrap_or(u8::MAX)
    }

    /// Nesting level for a list marker preceded by `indent` spaces.
    ///
    /// `floor(indent / spaces_per_level) + 1`, clamped to the bullet table.
    pub fn nesting_level(&self, indent: usize) -> u8 {
        let level = indent / self.spaces_per_level.max(1) + 1;
        let max = usize::from(self.max_list_level().max(1));
        // level ≤ max ≤ u8::MAX, so the cast is lossless
        level.min(max) as u8
    }

    /// Bullet style for a nesting level, clamped to the table.
    pub fn bullet(&self, level: u8) -> &BulletStyle {
        let idx = usize::from(level.max(1)) - 1;
        let idx = idx.min(self.bullets.len().saturating_sub(1));
        &self.bullets[idx]
    }

    /// Hanging-indent metrics for a nesting level.
    pub fn list_indent(&self, level: u8) -> ListIndent {
        ListIndent {
            left_cm: self.indent_step_cm * f32::from(level),
            first_line_cm: self.first_line_indent_cm,
        }
    }

    fn validate(&self) -> Result<(), Md2DocxError> {
        if let Some(size) = self.heading_sizes.iter().find(|s| **s <= 0.0) {
            return Err(Md2DocxError::InvalidConfig(format!(
                "heading sizes must be positive, got {size}"
            )));
        }
        if self.paragraph_size <= 0.0 {
            return Err(Md2DocxError::InvalidConfig(format!(
                "paragraph size must be positive, got {}",
                self.paragraph_size
            )));
        }
        if self.bullets.is_empty() {
            return Err(Md2DocxError::InvalidConfig(
                "bullet table must have at least one level".into(),
            ));
        }
        if self.bullets.len() > usize::from(u8::MAX) {
            return Err(Md2DocxError::InvalidConfig(format!(
                "bullet table supports at most {} levels, got {}",
                u8::MAX,
                self.bullets.len()
            )));
        }
        if let Some(b) = self.bullets.iter().find(|b| b.size_pt <= 0.0) {
            return Err(Md2DocxError::InvalidConfig(format!(
                "bullet '{}' must have a positive size, got {}",
                b.glyph, b.size_pt
            )));
        }
        if self.spaces_per_level == 0 {
            return Err(Md2DocxError::InvalidConfig(
                "spaces per level must be ≥ 1".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`StyleConfig`].
#[derive(Debug)]
pub struct StyleConfigBuilder {
    config: StyleConfig,
}

impl StyleConfigBuilder {
    pub fn heading_sizes(mut self, sizes: [f32; 3]) -> Self {
        self.config.heading_sizes = sizes;
        self
    }

    pub fn heading_bold(mut self, v: bool) -> Self {
        self.config.heading_bold = v;
        self
    }

    pub fn bullets(mut self, bullets: Vec<BulletStyle>) -> Self {
        self.config.bullets = bullets;
        self
    }

    pub fn paragraph_size(mut self, size: f32) -> Self {
        self.config.paragraph_size = size;
        self
    }

    pub fn indent_step_cm(mut self, cm: f32) -> Self {
        self.config.indent_step_cm = cm;
        self
    }

    pub fn first_line_indent_cm(mut self, cm: f32) -> Self {
        self.config.first_line_indent_cm = cm;
        self
    }

    pub fn spaces_per_level(mut self, n: usize) -> Self {
        self.config.spaces_per_level = n;
        self
    }

    pub fn max_marker_indent(mut self, n: usize) -> Self {
        self.config.max_marker_indent = n;
        self
    }

    pub fn blank_lines(mut self, policy: BlankLines) -> Self {
        self.config.blank_lines = policy;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<StyleConfig, Md2DocxError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Enums and small types ────────────────────────────────────────────────

/// Glyph and font size of the bullet at one nesting level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletStyle {
    pub glyph: String,
    pub size_pt: f32,
}

impl BulletStyle {
    pub fn new(glyph: impl Into<String>, size_pt: f32) -> Self {
        Self {
            glyph: glyph.into(),
            size_pt,
        }
    }
}

/// What a whitespace-only source line becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankLines {
    /// Emit nothing. Paragraph spacing comes from the document style. (default)
    #[default]
    Drop,
    /// Emit an empty paragraph, keeping the vertical space.
    Preserve,
}

/// How source pages are stitched into one notes document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesLayout {
    /// Level-1 heading opening the notes. Default: "Lecture Notes".
    pub title: String,
    /// Level-2 heading before each page; `{n}` is the 1-indexed page number.
    pub page_heading: String,
    /// Text after each page. Default: [`PageSeparator::HorizontalRule`].
    pub separator: PageSeparator,
    /// Body of a failed page; `{error}` is replaced by the error message.
    pub placeholder: String,
}

impl Default for NotesLayout {
    fn default() -> Self {
        Self {
            title: "Lecture Notes".to_string(),
            page_heading: "Page {n}".to_string(),
            separator: PageSeparator::default(),
            placeholder: "*Error processing this page: {error}*".to_string(),
        }
    }
}

impl NotesLayout {
    pub fn page_heading_for(&self, page_num: usize) -> String {
        self.page_heading.replace("{n}", &page_num.to_string())
    }

    pub fn placeholder_for(&self, error: &str) -> String {
        self.placeholder.replace("{error}", error)
    }
}

/// Separator written after each page in assembled notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSeparator {
    /// No separator; pages are only split by their headings.
    None,
    /// Horizontal rule line `---`. (default)
    #[default]
    HorizontalRule,
    /// Custom line inserted after every page.
    Custom(String),
}

impl PageSeparator {
    /// The separator line, or `None` when pages are not separated.
    pub fn line(&self) -> Option<&str> {
        match self {
            PageSeparator::None => None,
            PageSeparator::HorizontalRule => Some("---"),
            PageSeparator::Custom(s) => Some(s.as_str()),
        }
    }
}
