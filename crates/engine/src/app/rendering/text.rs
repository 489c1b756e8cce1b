use crate::app::Rgba;

use super::canvas::Canvas;

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;
pub(crate) const TEXT_SCALE: i32 = 3;
pub(crate) const GLYPH_ADVANCE: i32 = (GLYPH_WIDTH + 1) * TEXT_SCALE;
pub(crate) const LINE_ADVANCE: i32 = (GLYPH_HEIGHT + 2) * TEXT_SCALE;

pub(crate) fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_ADVANCE
}

pub(crate) fn draw_text(canvas: &mut Canvas<'_>, x: i32, y: i32, text: &str, color: Rgba) {
    let mut cursor = x;
    for ch in text.chars() {
        draw_glyph(canvas, cursor, y, glyph_bits(ch), color);
        cursor += GLYPH_ADVANCE;
    }
}

/// Dark translucent plate sized to fit `lines`, with text on top.
pub(crate) fn draw_text_panel(
    canvas: &mut Canvas<'_>,
    x: i32,
    y: i32,
    lines: &[String],
    text_color: Rgba,
    background: Rgba,
    border: Rgba,
) {
    if lines.is_empty() {
        return;
    }
    let inset = 3 * TEXT_SCALE;
    let widest = lines.iter().map(|line| text_width(line)).max().unwrap_or(0);
    let panel_w = widest + inset * 2;
    let panel_h = lines.len() as i32 * LINE_ADVANCE + inset * 2;
    canvas.fill_rect(x, y, panel_w, panel_h, background);
    canvas.rect_outline(x, y, panel_w, panel_h, border);
    for (row, line) in lines.iter().enumerate() {
        draw_text(
            canvas,
            x + inset,
            y + inset + row as i32 * LINE_ADVANCE,
            line,
            text_color,
        );
    }
}

fn draw_glyph(canvas: &mut Canvas<'_>, x: i32, y: i32, bits: u16, color: Rgba) {
    for row in 0..GLYPH_HEIGHT {
        for col in 0..GLYPH_WIDTH {
            let shift = (GLYPH_HEIGHT - 1 - row) * GLYPH_WIDTH + (GLYPH_WIDTH - 1 - col);
            if bits & (1 << shift) == 0 {
                continue;
            }
            canvas.fill_rect(
                x + col * TEXT_SCALE,
                y + row * TEXT_SCALE,
                TEXT_SCALE,
                TEXT_SCALE,
                color,
            );
        }
    }
}

/// 3x5 glyph packed row-major, top-left pixel in bit 14. Lowercase renders as uppercase.
fn glyph_bits(ch: char) -> u16 {
    match ch.to_ascii_uppercase() {
        '!' => 0x2482,
        '"' => 0x5a00,
        '#' => 0x5f7d,
        '$' => 0x7ddf,
        '%' => 0x52a5,
        '&' => 0x2aab,
        '\'' => 0x2400,
        '(' => 0x1491,
        ')' => 0x4494,
        '*' => 0x0aa8,
        '+' => 0x05d0,
        ',' => 0x0014,
        '-' => 0x01c0,
        '.' => 0x0002,
        '/' => 0x12a4,
        '0' => 0x7b6f,
        '1' => 0x2c97,
        '2' => 0x73e7,
        '3' => 0x73cf,
        '4' => 0x5bc9,
        '5' => 0x79cf,
        '6' => 0x79ef,
        '7' => 0x7292,
        '8' => 0x7bef,
        '9' => 0x7bcf,
        ':' => 0x0410,
        ';' => 0x0414,
        '<' => 0x1511,
        '=' => 0x0e38,
        '>' => 0x4454,
        '?' => 0x72c2,
        '@' => 0x7be7,
        'A' => 0x2bed,
        'B' => 0x6bae,
        'C' => 0x7927,
        'D' => 0x6b6e,
        'E' => 0x79a7,
        'F' => 0x79a4,
        'G' => 0x796f,
        'H' => 0x5bed,
        'I' => 0x7497,
        'J' => 0x726f,
        'K' => 0x5bad,
        'L' => 0x4927,
        'M' => 0x5fed,
        'N' => 0x5ffd,
        'O' => 0x7b6f,
        'P' => 0x6ba4,
        'Q' => 0x7b79,
        'R' => 0x6bad,
        'S' => 0x79cf,
        'T' => 0x7492,
        'U' => 0x5b6f,
        'V' => 0x5b6a,
        'W' => 0x5bfd,
        'X' => 0x5aad,
        'Y' => 0x5a92,
        'Z' => 0x72a7,
        '[' => 0x6926,
        '\\' => 0x4889,
        ']' => 0x324b,
        '^' => 0x2a00,
        '_' => 0x0007,
        '|' => 0x2492,
        '~' => 0x0780,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_letters_and_digits_have_glyphs() {
        for ch in ('A'..='Z').chain('a'..='z').chain('0'..='9') {
            assert_ne!(glyph_bits(ch), 0, "missing glyph for {ch:?}");
        }
        assert_eq!(glyph_bits(' '), 0);
        assert_eq!(glyph_bits('é'), 0);
    }

    #[test]
    fn width_scales_with_char_count() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("HP: 100"), 7 * GLYPH_ADVANCE);
    }

    #[test]
    fn text_at_negative_origin_does_not_panic() {
        let mut buffer = vec![0u8; 16 * 16 * 4];
        let mut canvas = Canvas::new(&mut buffer, 16, 16);
        draw_text(&mut canvas, -30, -4, "SCORE: 120", [255, 255, 255, 255]);
        draw_text_panel(
            &mut canvas,
            10,
            10,
            &["PAUSED".to_string()],
            [255, 255, 255, 255],
            [0, 0, 0, 200],
            [90, 90, 90, 255],
        );
    }

    #[test]
    fn glyph_one_lights_expected_top_row() {
        let mut buffer = vec![0u8; 9 * 15 * 4];
        let mut canvas = Canvas::new(&mut buffer, 9, 15);
        draw_text(&mut canvas, 0, 0, "1", [255, 255, 255, 255]);
        // '1' top row is 0b010: only the middle column is lit.
        let lit = |x: usize, y: usize| buffer[(y * 9 + x) * 4 + 3] == 255;
        assert!(!lit(0, 0));
        assert!(lit(TEXT_SCALE as usize, 0));
        assert!(!lit(2 * TEXT_SCALE as usize, 0));
    }
}
