//! Built-in 5x7 bitmap font.
//!
//! Glyphs are drawn as filled cells in world space, so text scales with the
//! view like every other element. One cell is a tenth of the font size: a glyph
//! stands 7 cells tall on its baseline and advances 6 cells.

use kurbo::{Point, Rect};

pub const GLYPH_COLUMNS: u32 = 5;
pub const GLYPH_ROWS: usize = 7;
/// Horizontal advance per character, in cells.
pub const ADVANCE: f64 = 6.0;

/// Cell edge length for a font size.
pub fn cell_size(font_size: f64) -> f64 {
    font_size * 0.1
}

/// Row bitmaps, top row first, most significant of the low five bits leftmost.
/// Lowercase letters use the uppercase shapes. Unknown characters draw a box.
pub fn glyph(ch: char) -> [u8; GLYPH_ROWS] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; GLYPH_ROWS],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        ';' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '*' => [0b00000, 0b10101, 0b01110, 0b11111, 0b01110, 0b10101, 0b00000],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

/// Width of `text` at `font_size`, excluding the trailing gap.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    let count = text.chars().count();
    if count == 0 {
        return 0.0;
    }
    let cell = cell_size(font_size);
    (count as f64 - 1.0) * ADVANCE * cell + f64::from(GLYPH_COLUMNS) * cell
}

/// Filled areas of `text` laid out left to right from `origin` (left edge, baseline).
///
/// Adjacent lit cells in a row are merged into one rectangle.
pub fn glyph_rects(text: &str, origin: Point, font_size: f64) -> Vec<Rect> {
    let cell = cell_size(font_size);
    let top = origin.y - GLYPH_ROWS as f64 * cell;
    let mut rects = Vec::new();

    for (index, ch) in text.chars().enumerate() {
        let left = origin.x + index as f64 * ADVANCE * cell;
        for (row, bits) in glyph(ch).iter().enumerate() {
            let y0 = top + row as f64 * cell;
            let mut col = 0;
            while col < GLYPH_COLUMNS {
                if (bits >> (GLYPH_COLUMNS - 1 - col)) & 1 == 0 {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < GLYPH_COLUMNS && (bits >> (GLYPH_COLUMNS - 1 - col)) & 1 == 1 {
                    col += 1;
                }
                rects.push(Rect::new(
                    left + f64::from(start) * cell,
                    y0,
                    left + f64::from(col) * cell,
                    y0 + cell,
                ));
            }
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_uses_uppercase_glyph() {
        assert_eq!(glyph('q'), glyph('Q'));
        assert_ne!(glyph('Q'), glyph('O'));
    }

    #[test]
    fn test_space_is_blank() {
        assert!(glyph_rects("   ", Point::ZERO, 10.0).is_empty());
    }

    #[test]
    fn test_text_width() {
        assert!((text_width("", 10.0)).abs() < f64::EPSILON);
        assert!((text_width("A", 10.0) - 5.0).abs() < 1e-12);
        assert!((text_width("AB", 10.0) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_rows_sit_on_baseline() {
        let rects = glyph_rects("_", Point::new(10.0, 100.0), 20.0);
        assert_eq!(rects.len(), 1);
        let bar = rects[0];
        assert!((bar.x0 - 10.0).abs() < 1e-12);
        assert!((bar.x1 - 20.0).abs() < 1e-12);
        assert!((bar.y1 - 100.0).abs() < 1e-12);
        assert!((bar.y0 - 98.0).abs() < 1e-12);
    }

    #[test]
    fn test_runs_merged() {
        // 'T' top row is one run of five cells, then a single centre cell per row.
        let rects = glyph_rects("T", Point::ZERO, 10.0);
        assert_eq!(rects.len(), 7);
        assert!((rects[0].width() - 5.0).abs() < 1e-12);
        assert!((rects[1].width() - 1.0).abs() < 1e-12);
    }
}
