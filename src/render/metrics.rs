//! Heuristic text metrics from a proportional character width table
//!
//! Good enough to reserve annotation zones without a font engine. Hosts with
//! real shaping implement [`TextMeasure`] themselves.

use crate::surface::{Font, TextMeasure};

use super::defaults;

/// Proportional character widths for printable ASCII (hundredths of an average glyph).
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Text length in hundredths of an average glyph; non-ASCII counts as 100.
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                100
            }
        })
        .sum()
}

/// [`TextMeasure`] backed by [`AW_CHAR`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProportionalMetrics;

impl ProportionalMetrics {
    pub fn line_width(&self, line: &str, font: &Font) -> f64 {
        let mut width = text_length(line) as f64 * 0.01 * defaults::CHARWID * font.size;
        if font.bold {
            width *= defaults::BOLD_WIDEN;
        }
        width
    }
}

impl TextMeasure for ProportionalMetrics {
    fn text_height(&self, lines: &[&str], font: &Font) -> f64 {
        match lines.len() {
            0 => 0.0,
            n => font.size * (1.0 + (n - 1) as f64 * defaults::LINE_SPACING),
        }
    }

    fn text_width(&self, lines: &[&str], font: &Font) -> f64 {
        lines
            .iter()
            .map(|line| self.line_width(line, font))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn font(size: f64, bold: bool) -> Font {
        Font {
            family: "sans-serif".into(),
            size,
            color: Color::BLACK,
            bold,
            italic: false,
        }
    }

    #[test]
    fn digits_share_one_width() {
        assert_eq!(text_length("0123456789"), 910);
        assert_eq!(text_length("é"), 100);
    }

    #[test]
    fn height_grows_with_lines() {
        let m = ProportionalMetrics;
        let f = font(10.0, false);
        assert_eq!(m.text_height(&[], &f), 0.0);
        assert_eq!(m.text_height(&["A"], &f), 10.0);
        assert!((m.text_height(&["A", "B", "C"], &f) - 34.0).abs() < 1e-9);
    }

    #[test]
    fn width_is_widest_line() {
        let m = ProportionalMetrics;
        let f = font(14.0, false);
        let short = m.text_width(&["ab"], &f);
        let long = m.text_width(&["ab", "abcdef"], &f);
        assert!(long > short);
        assert!((m.text_width(&["1"], &f) - 0.91 * 8.0).abs() < 1e-9);
        assert!(m.text_width(&["1"], &font(14.0, true)) > m.text_width(&["1"], &f));
    }
}
