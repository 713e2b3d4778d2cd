/// The built-in Helvetica family. These are standard PDF base fonts,
/// available in every viewer without embedding, which keeps invoice
/// output small and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

/// Character widths for Helvetica (ASCII 32..=126) in 1/1000 em.
/// Source: Adobe Helvetica AFM data.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // 32 (space) ..
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333,
    // 42 (*) ..
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556,
    // 52 (4) ..
    556, 556, 556, 556, 556, 556, 278, 278, 584, 584,
    // 62 (>) ..
    584, 556, 1015, 667, 667, 722, 722, 667, 611, 778,
    // 72 (H) ..
    722, 278, 500, 667, 556, 833, 722, 778, 667, 778,
    // 82 (R) ..
    722, 667, 611, 722, 667, 944, 667, 667, 611, 278,
    // 92 (backslash) ..
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    // 102 (f) ..
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 112 (p) ..
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500,
    // 122 (z) ..
    500, 334, 260, 334, 584,
];

/// Character widths for Helvetica-Bold (ASCII 32..=126) in 1/1000 em.
/// Source: Adobe Helvetica-Bold AFM data.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // 32 (space) ..
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333,
    // 42 (*) ..
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556,
    // 52 (4) ..
    556, 556, 556, 556, 556, 556, 333, 333, 584, 584,
    // 62 (>) ..
    584, 611, 975, 722, 722, 722, 722, 667, 611, 778,
    // 72 (H) ..
    722, 278, 556, 722, 611, 833, 722, 778, 667, 778,
    // 82 (R) ..
    722, 667, 611, 722, 667, 944, 667, 667, 611, 333,
    // 92 (backslash) ..
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    // 102 (f) ..
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    // 112 (p) ..
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556,
    // 122 (z) ..
    500, 389, 280, 389, 584,
];

/// Width used for characters outside the mapped ASCII range.
const DEFAULT_WIDTH: u16 = 278;

/// Line height multiplier applied to the font size.
const LINE_HEIGHT_FACTOR: f64 = 1.2;

impl Font {
    /// PDF resource name used in content streams. Fixed mapping.
    pub fn pdf_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
        }
    }

    /// PDF BaseFont name.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// All family members, in resource-name order.
    pub fn all() -> [Font; 3] {
        [Font::Helvetica, Font::HelveticaBold, Font::HelveticaOblique]
    }

    /// Width of a single character in 1/1000 em units.
    /// Oblique shares the regular face's metrics.
    pub fn char_width(self, ch: char) -> u16 {
        let code = ch as u32;
        if !(32..=126).contains(&code) {
            return DEFAULT_WIDTH;
        }
        let index = (code - 32) as usize;
        match self {
            Font::Helvetica | Font::HelveticaOblique => HELVETICA_WIDTHS[index],
            Font::HelveticaBold => HELVETICA_BOLD_WIDTHS[index],
        }
    }

    /// Width of a text string in points at the given font size.
    pub fn text_width(self, text: &str, size: f64) -> f64 {
        let total: u32 = text.chars().map(|ch| self.char_width(ch) as u32).sum();
        total as f64 * size / 1000.0
    }

    /// Baseline-to-baseline line height for the given font size.
    pub fn line_height(self, size: f64) -> f64 {
        size * LINE_HEIGHT_FACTOR
    }
}
