//! 5x7 bitmap font for digits and the `/`, `.`, `%` glyphs.
//!
//! Each glyph is 7 rows of 5 bits, most significant bit on the left:
//!
//! ```text
//! '4' = 0b00010  ...#.
//!       0b00110  ..##.
//!       0b01010  .#.#.
//!       0b10010  #..#.
//!       0b11111  #####
//!       0b00010  ...#.
//!       0b00010  ...#.
//! ```
//!
//! Text is drawn by filling a `scale x scale` block per set bit; the cursor
//! advances `(5 + spacing) * scale` pixels per character.

use super::{Canvas, Color};

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// One character of the bitmap font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub rows: [u8; GLYPH_HEIGHT as usize],
}

impl Glyph {
    /// Whether the bit at `(col, row)` is set.
    pub fn is_set(&self, col: u32, row: u32) -> bool {
        col < GLYPH_WIDTH
            && row < GLYPH_HEIGHT
            && (self.rows[row as usize] >> (GLYPH_WIDTH - 1 - col)) & 1 == 1
    }
}

const fn glyph(ch: char, rows: [u8; 7]) -> Glyph {
    Glyph { ch, rows }
}

const SPACE: Glyph = glyph(' ', [0, 0, 0, 0, 0, 0, 0]);

static FONT_5X7: [Glyph; 14] = [
    glyph('0', [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
    glyph('1', [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    glyph('2', [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
    glyph('3', [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110]),
    glyph('4', [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
    glyph('5', [0b11111, 0b10000, 0b10000, 0b11110, 0b00001, 0b00001, 0b11110]),
    glyph('6', [0b01110, 0b10000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
    glyph('7', [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
    glyph('8', [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
    glyph('9', [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110]),
    glyph('/', [0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000, 0b00000]),
    glyph('.', [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110]),
    glyph('%', [0b11001, 0b11010, 0b00100, 0b01000, 0b10110, 0b00110, 0b00000]),
    SPACE,
];

/// Look up the glyph for `ch`; unmapped characters render as a space.
pub fn glyph_for(ch: char) -> &'static Glyph {
    FONT_5X7.iter().find(|g| g.ch == ch).unwrap_or(&FONT_5X7[13])
}

/// Rendered width in pixels of `text` (no trailing spacing), saturating at
/// `u32::MAX`.
pub fn measure_text(text: &str, scale: u32, spacing: u32) -> u32 {
    let len = text.chars().count() as u128;
    if len == 0 {
        return 0;
    }
    let units = len * (u128::from(GLYPH_WIDTH) + u128::from(spacing)) - u128::from(spacing);
    u32::try_from(units * u128::from(scale)).unwrap_or(u32::MAX)
}

/// Rendered height in pixels of one line at `scale`, saturating at
/// `u32::MAX`.
pub fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT.saturating_mul(scale)
}

/// Clamp a wide coordinate into the `i32` range the canvas primitives take.
fn coord(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Canvas {
    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        scale: u32,
        color: Color,
        spacing: u32,
    ) {
        // Positions are tracked in i64 and clamped, so huge scales clip
        // instead of wrapping
        let s = i64::from(scale);
        let advance = (i64::from(GLYPH_WIDTH) + i64::from(spacing)).saturating_mul(s);
        let mut cursor_x = i64::from(x);
        for ch in text.chars() {
            if cursor_x >= self.width() as i64 {
                break;
            }
            let glyph = glyph_for(ch);
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if !glyph.is_set(col, row) {
                        continue;
                    }
                    let px = cursor_x.saturating_add(i64::from(col) * s);
                    let py = i64::from(y).saturating_add(i64::from(row) * s);
                    self.fill_rect(
                        coord(px),
                        coord(py),
                        coord(px.saturating_add(s)),
                        coord(py.saturating_add(s)),
                        color,
                    );
                }
            }
            cursor_x = cursor_x.saturating_add(advance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_table_complete() {
        for ch in "0123456789/.% ".chars() {
            assert_eq!(glyph_for(ch).ch, ch);
        }
        assert!(FONT_5X7.iter().all(|g| g.rows.iter().all(|&r| r < 32)));
    }

    #[test]
    fn test_unmapped_falls_back_to_space() {
        assert_eq!(*glyph_for('A'), SPACE);
        assert_eq!(*glyph_for('•'), SPACE);
    }

    #[test]
    fn test_glyph_bits() {
        let one = glyph_for('1');
        assert!(one.is_set(2, 0));
        assert!(!one.is_set(0, 0));
        assert!(one.is_set(1, 1));
        assert!(!one.is_set(5, 0));
    }

    #[test]
    fn test_measure_text() {
        assert_eq!(measure_text("", 4, 2), 0);
        assert_eq!(measure_text("1", 4, 2), 20);
        // 6 chars * 7 units * 3 - 2 * 3
        assert_eq!(measure_text("60/365", 3, 2), 120);
        assert_eq!(measure_text("%", 1, 1), 5);
    }

    #[test]
    fn test_draw_text_matches_measure() {
        let text = "16.4%";
        let (scale, spacing) = (3, 2);
        let mut canvas = Canvas::new(200, 40).unwrap();
        canvas.draw_text(text, 10, 5, scale, Color::WHITE, spacing);

        let mut min_x = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for y in 0..40 {
            for x in 0..200 {
                if canvas.pixel(x, y) == Some(Color::WHITE) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }
        // '1' starts one column in, '%' has ink in its last column
        assert_eq!(min_x, 10 + 3);
        assert_eq!(max_x, 10 + measure_text(text, scale, spacing) as i32 - 1);
        assert!(max_y < 5 + text_height(scale) as i32);
    }

    #[test]
    fn test_huge_scale_clips() {
        assert_eq!(measure_text("60/365", u32::MAX, 2), u32::MAX);
        assert_eq!(measure_text("1", u32::MAX, 0), u32::MAX);
        assert_eq!(text_height(u32::MAX), u32::MAX);

        // '%' has ink in its top-left cell, which now covers the whole canvas
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.draw_text("%%", 0, 0, u32::MAX, Color::WHITE, u32::MAX);
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(15, 15), Some(Color::WHITE));

        // Origins past the far edges draw nothing
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.draw_text("%8", i32::MAX, 0, u32::MAX, Color::WHITE, 2);
        canvas.draw_text("%8", 0, i32::MAX, u32::MAX, Color::WHITE, 2);
        assert!(canvas.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_text_scales_blocks() {
        let mut canvas = Canvas::new(20, 30).unwrap();
        canvas.draw_text(".", 0, 0, 2, Color::WHITE, 1);
        // '.' occupies columns 2-3, rows 5-6 of the glyph
        for y in 0..14 {
            for x in 0..10 {
                let on = (4..8).contains(&x) && (10..14).contains(&y);
                assert_eq!(canvas.pixel(x, y) == Some(Color::WHITE), on, "({}, {})", x, y);
            }
        }
    }
}
