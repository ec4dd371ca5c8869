use crate::primitives::{FontWeight, TextStyle};

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Approximate advance widths (in em) of a proportional sans-serif face.
fn advance_em(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | ' ' | '-' => 0.36,
        'm' | 'w' | 'M' | 'W' | '%' => 0.85,
        '0'..='9' => 0.56,
        c if c.is_ascii_uppercase() => 0.68,
        _ => 0.55,
    }
}

/// Estimate text extent in points. SVG output leaves glyph layout to the
/// viewer, so this only needs to be close enough for margins and legends.
pub fn measure_text(text: &str, size_pt: f64, weight: FontWeight) -> TextMetrics {
    let bold = if weight == FontWeight::Bold { 1.06 } else { 1.0 };
    let em: f64 = text.chars().map(advance_em).sum();
    TextMetrics { width: em * size_pt * bold, height: size_pt * 1.2, ascent: size_pt * 0.93 }
}

/// Measure text with a TextStyle.
pub fn measure_styled(text: &str, style: &TextStyle) -> TextMetrics {
    measure_text(text, style.size, style.weight)
}
