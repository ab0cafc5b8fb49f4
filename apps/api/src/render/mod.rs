//! PDF rendering — the back half of the document assembler.
//!
//! Two-path state machine:
//! - Structured: markdown → blocks (`layout::assemble`) → paginated PDF.
//! - Fallback: Title + fixed notice + the raw text as a single body
//!   paragraph. No parsing happens on this path, so it succeeds for any
//!   input; it is the terminal state for every structured failure.
//!
//! The only error that ever escapes `render_report` is an unwritable output
//! location. The artifact is written through a tempfile and renamed into
//! place, so no partial PDF is ever visible at the report path.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;
use tracing::{debug, warn};

use crate::layout::{
    assemble_blocks, metrics_for, DocumentBlock, FontId, PageGeometry, TextStyle, BODY_STYLE,
    HEADING_STYLE, TITLE_STYLE,
};

/// Notice paragraph shown on the fallback path.
const FALLBACK_NOTICE: &str = "Error creating formatted report. Displaying plain text:";
const REPORT_SUFFIX: &str = "_report.pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error writing report: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF build error: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Renders the report PDF for `email` into `reports_dir`, returning the
/// artifact path. Overwrites any prior artifact for the same identity.
///
/// Structured rendering failures are downgraded to the fallback document;
/// only filesystem errors propagate.
pub fn render_report(
    email: &str,
    markdown: &str,
    reports_dir: &Path,
) -> Result<PathBuf, RenderError> {
    std::fs::create_dir_all(reports_dir)?;
    let path = reports_dir.join(format!("{}{REPORT_SUFFIX}", sanitize_identity(email)));

    let doc = match build_structured(email, markdown) {
        Ok(doc) => doc,
        Err(err) => {
            warn!("Structured render failed, falling back to plain text: {err}");
            build_fallback(email, markdown)?
        }
    };

    write_atomic(doc, &path)?;
    debug!(path = %path.display(), "report artifact written");
    Ok(path)
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`, yielding a
/// filesystem-safe token for the artifact filename.
pub fn sanitize_identity(email: &str) -> String {
    email
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn build_structured(email: &str, markdown: &str) -> anyhow::Result<Document> {
    let blocks = assemble_blocks(email, markdown)?;
    Ok(render_blocks(&blocks)?)
}

fn build_fallback(email: &str, markdown: &str) -> Result<Document, lopdf::Error> {
    let blocks = vec![
        DocumentBlock::Title(format!("Interview Report for {email}")),
        DocumentBlock::Spacer(20.0),
        DocumentBlock::Paragraph(FALLBACK_NOTICE.to_string()),
        DocumentBlock::Spacer(10.0),
        DocumentBlock::Paragraph(markdown.to_string()),
    ];
    render_blocks(&blocks)
}

fn render_blocks(blocks: &[DocumentBlock]) -> Result<Document, lopdf::Error> {
    let mut writer = PageWriter::new(PageGeometry::letter());
    for block in blocks {
        match block {
            DocumentBlock::Title(text) => writer.write_text(text, &TITLE_STYLE),
            DocumentBlock::Heading(text) => writer.write_text(text, &HEADING_STYLE),
            DocumentBlock::Paragraph(text) => writer.write_text(text, &BODY_STYLE),
            DocumentBlock::Spacer(gap) => writer.advance(*gap),
        }
    }
    writer.finish()
}

/// Accumulates text operations page by page, breaking at the bottom margin.
struct PageWriter {
    geometry: PageGeometry,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    cursor_y: f32,
}

impl PageWriter {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            ops: Vec::new(),
            cursor_y: geometry.height_pt - geometry.margin_pt,
        }
    }

    /// Word-wraps `text` in the style's font and emits one text run per
    /// line, opening a new page whenever a line would cross the bottom margin.
    fn write_text(&mut self, text: &str, style: &TextStyle) {
        let metrics = metrics_for(style.font);
        let lines = metrics.wrap_words(text, style.size_pt, self.geometry.text_width_pt());

        for line in lines {
            if self.cursor_y - style.leading_pt < self.geometry.margin_pt {
                self.break_page();
            }
            self.cursor_y -= style.leading_pt;

            self.ops.push(Operation::new("BT", vec![]));
            self.ops.push(Operation::new(
                "Tf",
                vec![
                    style.font.resource_name().into(),
                    Object::Integer(style.size_pt as i64),
                ],
            ));
            self.ops.push(Operation::new(
                "Td",
                vec![
                    Object::Integer(self.geometry.margin_pt as i64),
                    Object::Integer(self.cursor_y as i64),
                ],
            ));
            self.ops
                .push(Operation::new("Tj", vec![Object::string_literal(encode_winansi(&line))]));
            self.ops.push(Operation::new("ET", vec![]));
        }

        self.advance(style.space_after_pt);
    }

    /// Moves the cursor down without emitting text; gaps never force a page
    /// break on their own.
    fn advance(&mut self, gap_pt: f32) {
        self.cursor_y = (self.cursor_y - gap_pt).max(self.geometry.margin_pt);
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.cursor_y = self.geometry.height_pt - self.geometry.margin_pt;
    }

    fn finish(mut self) -> Result<Document, lopdf::Error> {
        self.pages.push(std::mem::take(&mut self.ops));

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => FontId::Helvetica.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        let font_bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => FontId::HelveticaBold.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FontId::Helvetica.resource_name() => font_regular,
                FontId::HelveticaBold.resource_name() => font_bold,
            },
        });

        let mut page_ids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            page_ids.push(page_id.into());
        }

        let count = page_ids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Integer(self.geometry.width_pt as i64),
                    Object::Integer(self.geometry.height_pt as i64),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }
}

/// Maps text to WinAnsi bytes: ASCII and Latin-1 pass through, everything
/// else becomes `?`.
fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

fn write_atomic(mut doc: Document, path: &Path) -> Result<(), RenderError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    doc.save_to(tmp.as_file_mut())?;
    tmp.persist(path).map_err(|e| RenderError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_tempdir(email: &str, markdown: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = render_report(email, markdown, dir.path()).expect("render must not fail");
        (dir, path)
    }

    #[test]
    fn test_sanitize_identity_replaces_unsafe_chars() {
        assert_eq!(sanitize_identity("jane@test.com"), "jane_test.com");
        assert_eq!(sanitize_identity("a b/c\\d"), "a_b_c_d");
        assert_eq!(sanitize_identity("plain-name_1.2"), "plain-name_1.2");
    }

    #[test]
    fn test_render_produces_pdf_at_derived_path() {
        let (_dir, path) = render_to_tempdir("jane@test.com", "## Section 1\nGood job.");
        assert!(path.ends_with("jane_test.com_report.pdf"));
        let bytes = std::fs::read(&path).expect("artifact readable");
        assert!(bytes.starts_with(b"%PDF"), "artifact must be a PDF");
    }

    #[test]
    fn test_render_never_fails_on_odd_input() {
        for input in ["", "plain text", "before <h2> unterminated", "## \n\n##", "\u{1F600} emoji"] {
            let (_dir, path) = render_to_tempdir("x@y.com", input);
            assert!(path.exists(), "artifact missing for input {input:?}");
        }
    }

    #[test]
    fn test_render_overwrites_prior_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = render_report("a@x.com", "first version", dir.path()).unwrap();
        let second = render_report("a@x.com", "second version", dir.path()).unwrap();
        assert_eq!(first, second, "same identity maps to the same path");
        let bytes = std::fs::read(&second).unwrap();
        assert!(find_bytes(&bytes, b"second"), "latest content wins");
    }

    #[test]
    fn test_fallback_contains_raw_text_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let doc = build_fallback("a@x.com", "RAW_FALLBACK_TOKEN and more").expect("fallback builds");
        let path = dir.path().join("fallback.pdf");
        write_atomic(doc, &path).expect("fallback writes");

        // Content streams are uncompressed, so the token appears literally.
        let bytes = std::fs::read(&path).unwrap();
        assert!(find_bytes(&bytes, b"RAW_FALLBACK_TOKEN"));
        assert!(find_bytes(&bytes, FALLBACK_NOTICE.split(' ').next().unwrap().as_bytes()));
    }

    #[test]
    fn test_long_report_paginates() {
        let body = (0..80)
            .map(|i| format!("Paragraph {i} with enough words to take a full line of text."))
            .collect::<Vec<_>>()
            .join("\n\n");
        let (_dir, path) = render_to_tempdir("a@x.com", &body);
        let doc = Document::load(&path).expect("valid PDF");
        assert!(doc.get_pages().len() > 1, "80 paragraphs must span pages");
    }

    #[test]
    fn test_unwritable_location_is_the_fatal_case() {
        let result = render_report("a@x.com", "text", Path::new("/proc/definitely/not/writable"));
        assert!(result.is_err());
    }

    fn find_bytes(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }
}
