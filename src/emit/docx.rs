//! Minimal WordprocessingML (.docx) emitter.
//!
//! A .docx file is a zip archive of XML parts. Five parts are enough for
//! word processors to open the result:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! word/document.xml            ← one <w:p> per block
//! word/_rels/document.xml.rels
//! word/styles.xml              ← Normal + Heading1..3
//! ```
//!
//! Sizes in WordprocessingML are half-points (`w:sz`) and indents are twips
//! (1/1440 inch), so the block model's points and centimetres are converted
//! here and nowhere else.

use super::DocumentEmitter;
use crate::error::Md2DocxError;
use crate::model::{Block, Document, ListIndent, Run};
use std::io::{Seek, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const TWIPS_PER_CM: f32 = 1440.0 / 2.54;

/// Writes a [`Document`] as a .docx package into any seekable writer.
pub struct DocxEmitter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> DocxEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }
}

impl<W: Write + Seek> DocumentEmitter for DocxEmitter<W> {
    type Output = W;

    fn emit(mut self, document: &Document) -> Result<W, Md2DocxError> {
        let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let document_xml = render_document_xml(document);
        debug!(
            "Writing .docx package: {} blocks, document.xml {} bytes",
            document.len(),
            document_xml.len()
        );

        write_part(&mut self.zip, "[Content_Types].xml", CONTENT_TYPES_XML, opt)?;
        write_part(&mut self.zip, "_rels/.rels", RELS_XML, opt)?;
        write_part(&mut self.zip, "word/document.xml", &document_xml, opt)?;
        write_part(&mut self.zip, "word/_rels/document.xml.rels", WORD_RELS_XML, opt)?;
        write_part(&mut self.zip, "word/styles.xml", STYLES_XML, opt)?;

        Ok(self.zip.finish()?)
    }
}

fn write_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    body: &str,
    opt: SimpleFileOptions,
) -> Result<(), Md2DocxError> {
    zip.start_file(name, opt)?;
    zip.write_all(body.as_bytes())
        .map_err(|e| Md2DocxError::Package {
            detail: format!("{name}: {e}"),
        })
}

// ── document.xml ─────────────────────────────────────────────────────────────

/// Render the `word/document.xml` part for a document.
pub fn render_document_xml(document: &Document) -> String {
    let mut body = String::new();
    for block in document {
        render_block(block, &mut body);
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="11906" w:h="16838"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

fn render_block(block: &Block, xml: &mut String) {
    match block {
        Block::Paragraph { runs } if runs.is_empty() => xml.push_str("<w:p/>"),
        Block::Paragraph { runs } => {
            xml.push_str("<w:p>");
            render_runs(runs, xml);
            xml.push_str("</w:p>");
        }
        Block::Heading { level, runs } => {
            xml.push_str(&format!(
                r#"<w:p><w:pPr><w:pStyle w:val="Heading{level}"/></w:pPr>"#
            ));
            render_runs(runs, xml);
            xml.push_str("</w:p>");
        }
        Block::ListItem {
            glyph,
            glyph_size_pt,
            indent,
            runs,
            ..
        } => {
            xml.push_str("<w:p><w:pPr>");
            render_indent(indent, xml);
            xml.push_str("</w:pPr>");
            render_run(&Run::plain(format!("{glyph} "), *glyph_size_pt), xml);
            render_runs(runs, xml);
            xml.push_str("</w:p>");
        }
    }
}

fn render_indent(indent: &ListIndent, xml: &mut String) {
    let left = cm_to_twips(indent.left_cm);
    let first_line = cm_to_twips(indent.first_line_cm);
    if first_line >= 0 {
        xml.push_str(&format!(
            r#"<w:ind w:left="{left}" w:firstLine="{first_line}"/>"#
        ));
    } else {
        xml.push_str(&format!(
            r#"<w:ind w:left="{left}" w:hanging="{}"/>"#,
            -first_line
        ));
    }
}

fn render_runs(runs: &[Run], xml: &mut String) {
    for run in runs {
        render_run(run, xml);
    }
}

fn render_run(run: &Run, xml: &mut String) {
    let size = pt_to_half_points(run.size_pt);
    xml.push_str("<w:r><w:rPr>");
    if run.bold {
        xml.push_str("<w:b/><w:bCs/>");
    }
    xml.push_str(&format!(
        r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr>"#
    ));
    xml.push_str(r#"<w:t xml:space="preserve">"#);
    xml.push_str(&xml_escape_text(&run.text));
    xml.push_str("</w:t></w:r>");
}

fn pt_to_half_points(pt: f32) -> u32 {
    (pt * 2.0).round().max(1.0) as u32
}

fn cm_to_twips(cm: f32) -> i32 {
    (cm * TWIPS_PER_CM).round() as i32
}

/// Escape text for an XML text node, dropping characters XML 1.0 forbids.
fn xml_escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

// ── Static package parts ─────────────────────────────────────────────────────

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const WORD_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

// Heading styles only set outline level and spacing; size and weight travel
// on each run so a caller's StyleConfig always wins.
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading2">
    <w:name w:val="heading 2"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="200" w:after="100"/><w:outlineLvl w:val="1"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading3">
    <w:name w:val="heading 3"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="160" w:after="80"/><w:outlineLvl w:val="2"/></w:pPr>
  </w:style>
</w:styles>"#;
