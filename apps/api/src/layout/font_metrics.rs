//! Static font-metric tables for the two PDF base-14 fonts the renderer uses.
//!
//! Widths are AFM advance widths in thousandths of an em, so
//! `width_pt = widths[i] / 1000 * font_size_pt`. Tables cover ASCII
//! 0x20..=0x7E (95 printable characters, index = char - 32); everything else
//! falls back to `average_width`. Base-14 fonts need no embedding, which
//! keeps the artifact small and the measurement exact for ASCII report text.

/// The two fonts the report styles draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    Helvetica,
    HelveticaBold,
}

impl FontId {
    /// PDF resource name of this font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontId::Helvetica => "F1",
            FontId::HelveticaBold => "F2",
        }
    }

    /// PostScript base font name.
    pub fn base_font(self) -> &'static str {
        match self {
            FontId::Helvetica => "Helvetica",
            FontId::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// Static character-width table for one font, in thousandths of an em.
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback for codepoints outside 0x20..=0x7E.
    average_width: u16,
    space_width: u16,
}

impl FontMetricTable {
    /// Measures the rendered width of `s` in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        let milli_ems: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    u32::from(self.widths[code - 32])
                } else {
                    u32::from(self.average_width)
                }
            })
            .sum();
        milli_ems as f32 / 1000.0 * size_pt
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_pt`.
    ///
    /// A single word wider than the line stays on its own line unbroken; the
    /// renderer lets it run slightly into the right margin rather than
    /// splitting mid-word. Whitespace runs (including newlines) collapse to
    /// single spaces. Empty or blank text yields no lines.
    pub fn wrap_words(&self, text: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let space_pt = self.space_width as f32 / 1000.0 * size_pt;
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_width = self.measure_str(word, size_pt);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space_pt + word_width > max_width_pt {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_pt + word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Helvetica AFM advance widths.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
         278,  278,  355,  556,  556,  889,  667,  191,  333,  333,  389,  584,  278,  333,  278,  278,
        // 0-9
         556,  556,  556,  556,  556,  556,  556,  556,  556,  556,
        // :     ;     <     =     >     ?     @
         278,  278,  584,  584,  584,  556, 1015,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
         667,  667,  722,  722,  667,  611,  778,  722,  278,  500,  667,  556,  833,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
         722,  778,  667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,
        // [     \     ]     ^     _     `
         278,  278,  278,  469,  556,  333,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
         556,  556,  500,  556,  556,  278,  556,  556,  222,  222,  500,  222,  833,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
         556,  556,  556,  556,  333,  500,  278,  556,  500,  722,  500,  500,  500,
        // {     |     }     ~
         334,  260,  334,  584,
    ],
    average_width: 513,
    space_width: 278,
};

/// Helvetica-Bold AFM advance widths.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
         278,  333,  474,  556,  556,  889,  722,  238,  333,  333,  389,  584,  278,  333,  278,  278,
        // 0-9
         556,  556,  556,  556,  556,  556,  556,  556,  556,  556,
        // :     ;     <     =     >     ?     @
         333,  333,  584,  584,  584,  611,  975,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
         722,  722,  722,  722,  667,  611,  778,  722,  278,  556,  722,  611,  833,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
         722,  778,  667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,
        // [     \     ]     ^     _     `
         333,  278,  333,  584,  556,  333,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
         556,  611,  556,  611,  556,  333,  611,  611,  278,  278,  556,  278,  889,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
         611,  611,  611,  611,  389,  556,  333,  611,  556,  778,  556,  556,  500,
        // {     |     }     ~
         389,  280,  389,  584,
    ],
    average_width: 546,
    space_width: 278,
};

/// Returns the static metric table for a font.
pub fn metrics_for(font: FontId) -> &'static FontMetricTable {
    match font {
        FontId::Helvetica => &HELVETICA_TABLE,
        FontId::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_is_zero() {
        assert_eq!(metrics_for(FontId::Helvetica).measure_str("", 12.0), 0.0);
    }

    #[test]
    fn test_measure_str_space_width() {
        // 278/1000 * 12pt = 3.336pt
        let width = metrics_for(FontId::Helvetica).measure_str(" ", 12.0);
        assert!((width - 3.336).abs() < 1e-3, "space should be ~3.336pt, got {width}");
    }

    #[test]
    fn test_measure_str_ascii_word() {
        // "Rust" in Helvetica: R(722) + u(556) + s(500) + t(278) = 2056 milli-em
        let width = metrics_for(FontId::Helvetica).measure_str("Rust", 10.0);
        assert!((width - 20.56).abs() < 1e-2, "Rust at 10pt should be ~20.56pt, got {width}");
    }

    #[test]
    fn test_measure_str_non_ascii_uses_fallback() {
        let metrics = metrics_for(FontId::Helvetica);
        let width = metrics.measure_str("é", 10.0);
        assert!((width - 5.13).abs() < 1e-2, "non-ASCII should use average width");
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let text = "Section Summary";
        let regular = metrics_for(FontId::Helvetica).measure_str(text, 12.0);
        let bold = metrics_for(FontId::HelveticaBold).measure_str(text, 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_wrap_words_blank_yields_no_lines() {
        let metrics = metrics_for(FontId::Helvetica);
        assert!(metrics.wrap_words("", 12.0, 468.0).is_empty());
        assert!(metrics.wrap_words("   \n  ", 12.0, 468.0).is_empty());
    }

    #[test]
    fn test_wrap_words_short_text_single_line() {
        let metrics = metrics_for(FontId::Helvetica);
        let lines = metrics.wrap_words("Keep improving.", 12.0, 468.0);
        assert_eq!(lines, vec!["Keep improving."]);
    }

    #[test]
    fn test_wrap_words_long_text_wraps() {
        let metrics = metrics_for(FontId::Helvetica);
        let text = "word ".repeat(200);
        let lines = metrics.wrap_words(&text, 12.0, 468.0);
        assert!(lines.len() > 1, "200 words must wrap past one line");
        for line in &lines {
            let width = metrics.measure_str(line, 12.0);
            assert!(width <= 468.0 + 1e-3, "line too wide: {width}pt: {line}");
        }
    }

    #[test]
    fn test_wrap_words_overlong_word_kept_whole() {
        let metrics = metrics_for(FontId::Helvetica);
        let word = "x".repeat(300);
        let lines = metrics.wrap_words(&word, 12.0, 468.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], word);
    }

    #[test]
    fn test_wrap_words_collapses_newlines() {
        let metrics = metrics_for(FontId::Helvetica);
        let lines = metrics.wrap_words("one\ntwo", 12.0, 468.0);
        assert_eq!(lines, vec!["one two"]);
    }
}
