//! Markdown → block assembly, the structured half of the document assembler.
//!
//! The model's report loosely follows markdown: an optional preamble, then
//! sections introduced by `##` headings, paragraphs separated by line breaks.
//! Conversion goes markdown → HTML (pulldown-cmark, tables and fenced code
//! enabled), then the HTML stream is split on `<h2>` boundaries into a
//! preamble plus sections. Malformed markup never aborts assembly: a chunk
//! with no closing heading tag is emitted as plain paragraphs, and stray
//! inline tags are stripped from paragraph text.

use anyhow::Result;
use pulldown_cmark::{html, Options, Parser};

use crate::layout::DocumentBlock;

/// Vertical gap after the title, matching the rendered report's header.
const TITLE_GAP_PT: f32 = 20.0;

/// Assembles the ordered block sequence for a report document.
///
/// Total for any input string, including empty input. The `Result` exists so
/// the renderer can downgrade any assembly failure to its fallback path.
pub fn assemble_blocks(email: &str, markdown: &str) -> Result<Vec<DocumentBlock>> {
    let html = convert_markdown(markdown)?;

    let mut blocks = vec![
        DocumentBlock::Title(format!("Interview Report for {email}")),
        DocumentBlock::Spacer(TITLE_GAP_PT),
    ];

    let mut sections = html.split("<h2>");

    // Everything before the first heading boundary is the preamble.
    if let Some(preamble) = sections.next() {
        push_paragraphs(&mut blocks, preamble);
    }

    for section in sections {
        match section.split_once("</h2>") {
            Some((heading, body)) => {
                let heading_text = strip_tags(heading);
                let heading_text = heading_text.trim();
                if !heading_text.is_empty() {
                    blocks.push(DocumentBlock::Heading(heading_text.to_string()));
                }
                push_paragraphs(&mut blocks, body);
            }
            // Unterminated heading marker: keep the text, skip the heading.
            None => push_paragraphs(&mut blocks, section),
        }
    }

    Ok(blocks)
}

fn convert_markdown(markdown: &str) -> Result<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    // Fenced code blocks are core CommonMark; they pass through untouched.
    let parser = Parser::new_ext(markdown, options);

    let mut html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut html, parser);
    Ok(html)
}

/// Emits one Paragraph per non-blank line-break-delimited chunk.
fn push_paragraphs(blocks: &mut Vec<DocumentBlock>, chunk: &str) {
    for piece in chunk.split("<br />").flat_map(|p| p.split('\n')) {
        let text = strip_tags(piece);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        blocks.push(DocumentBlock::Paragraph(text.to_string()));
    }
}

/// Drops `<...>` tag spans and decodes the entities pulldown-cmark escapes.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    unescape_entities(&out)
}

fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
