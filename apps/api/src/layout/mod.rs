// Document layout: block model, page geometry, and text styles for the
// PDF renderer. Block assembly is pure; rendering (render module) is the
// only consumer. CPU-bound work runs inside tokio::task::spawn_blocking.

pub mod assemble;
pub mod font_metrics;

pub use assemble::assemble_blocks;
pub use font_metrics::{metrics_for, FontId};

/// One layout element of the rendered report, in document order.
///
/// Built fresh per report from the markdown body; never mutated after
/// construction, only consumed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentBlock {
    /// Report title identifying the candidate.
    Title(String),
    /// A section heading (level-2 in the source markdown).
    Heading(String),
    /// Body text, word-wrapped by the renderer.
    Paragraph(String),
    /// Fixed vertical gap in points.
    Spacer(f32),
}

/// Fixed page geometry: US letter with uniform 1" margins.
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageGeometry {
    pub const fn letter() -> Self {
        Self {
            width_pt: 612.0,
            height_pt: 792.0,
            margin_pt: 72.0,
        }
    }

    /// Usable text width between the margins.
    pub fn text_width_pt(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }
}

/// Type style for one block kind: font, size, line leading, trailing gap.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub font: FontId,
    pub size_pt: f32,
    pub leading_pt: f32,
    pub space_after_pt: f32,
}

pub const TITLE_STYLE: TextStyle = TextStyle {
    font: FontId::HelveticaBold,
    size_pt: 18.0,
    leading_pt: 22.0,
    space_after_pt: 20.0,
};

pub const HEADING_STYLE: TextStyle = TextStyle {
    font: FontId::HelveticaBold,
    size_pt: 14.0,
    leading_pt: 16.0,
    space_after_pt: 10.0,
};

pub const BODY_STYLE: TextStyle = TextStyle {
    font: FontId::Helvetica,
    size_pt: 12.0,
    leading_pt: 14.0,
    space_after_pt: 8.0,
};
