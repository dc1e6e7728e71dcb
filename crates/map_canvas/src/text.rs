//! Kompakter Bitmap-Font für Karten-Labels.
//!
//! 3×5-Glyphen für Ziffern, Großbuchstaben und die in Lot-Nummern
//! üblichen Trennzeichen. Kleinbuchstaben werden als Großbuchstaben
//! gezeichnet, unbekannte Zeichen als Leerraum.

use image::{Rgba, RgbaImage};

use crate::draw::blend_pixel;

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;

/// Zeichnet einen Text (obere linke Ecke bei `x`, `y`).
///
/// `scale` vergrößert jedes Glyph-Pixel auf `scale × scale` Bildpixel.
pub fn draw_text(image: &mut RgbaImage, x: i64, y: i64, text: &str, color: Rgba<u8>, scale: u32) {
    let scale = scale.max(1);
    let advance = ((GLYPH_WIDTH + 1) * scale) as i64;
    let mut cursor_x = x;

    for ch in text.chars() {
        if let Some(rows) = glyph_for(ch) {
            for (row_idx, row) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if row & (0b100 >> col) == 0 {
                        continue;
                    }
                    let px = cursor_x + (col * scale) as i64;
                    let py = y + (row_idx as u32 * scale) as i64;
                    for sy in 0..scale as i64 {
                        for sx in 0..scale as i64 {
                            blend_pixel(image, px + sx, py + sy, color);
                        }
                    }
                }
            }
        }
        cursor_x += advance;
    }
}

/// Zeichnet Text mit Kontur (8 Richtungen, eine Glyph-Pixelbreite).
///
/// Entspricht der Label-Darstellung auf der Karte: farbiger Text mit
/// heller Umrandung, lesbar über Luftbildern.
pub fn draw_text_outlined(
    image: &mut RgbaImage,
    x: i64,
    y: i64,
    text: &str,
    color: Rgba<u8>,
    outline: Rgba<u8>,
    scale: u32,
) {
    let d = scale.max(1) as i64;
    for (dx, dy) in [
        (-d, -d),
        (0, -d),
        (d, -d),
        (-d, 0),
        (d, 0),
        (-d, d),
        (0, d),
        (d, d),
    ] {
        draw_text(image, x + dx, y + dy, text, outline, scale);
    }
    draw_text(image, x, y, text, color, scale);
}

/// Pixelbreite eines Texts (ohne abschließenden Zeichenabstand).
pub fn text_width(text: &str, scale: u32) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    let scale = scale.max(1);
    chars * GLYPH_WIDTH * scale + (chars - 1) * scale
}

/// Pixelhöhe einer Textzeile.
pub fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale.max(1)
}

fn glyph_for(ch: char) -> Option<&'static [u8; 5]> {
    let glyph = match ch.to_ascii_uppercase() {
        '0' => &[0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => &[0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => &[0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => &[0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => &[0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => &[0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => &[0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => &[0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => &[0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => &[0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => &[0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => &[0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => &[0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => &[0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => &[0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => &[0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => &[0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => &[0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => &[0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => &[0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => &[0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => &[0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => &[0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => &[0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => &[0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => &[0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => &[0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => &[0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => &[0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => &[0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => &[0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => &[0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => &[0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => &[0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => &[0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => &[0b111, 0b001, 0b010, 0b100, 0b111],
        '-' => &[0b000, 0b000, 0b111, 0b000, 0b000],
        '_' => &[0b000, 0b000, 0b000, 0b000, 0b111],
        '.' => &[0b000, 0b000, 0b000, 0b000, 0b010],
        '/' => &[0b001, 0b001, 0b010, 0b100, 0b100],
        _ => return None,
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("7", 1), 3);
        assert_eq!(text_width("12", 1), 7); // 3+1+3
        assert_eq!(text_width("12", 2), 14);
    }

    #[test]
    fn test_draw_digit_sets_pixels() {
        let mut img = RgbaImage::new(10, 10);
        draw_text(&mut img, 0, 0, "1", Rgba([255, 0, 0, 255]), 1);
        // Oberste Reihe von '1' = 0b010 → nur mittlere Spalte
        assert_eq!(img.get_pixel(1, 0)[3], 255);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_lowercase_uses_uppercase_glyph() {
        let mut upper = RgbaImage::new(8, 8);
        let mut lower = RgbaImage::new(8, 8);
        draw_text(&mut upper, 0, 0, "A", Rgba([0, 0, 0, 255]), 1);
        draw_text(&mut lower, 0, 0, "a", Rgba([0, 0, 0, 255]), 1);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_draw_out_of_bounds_does_not_panic() {
        let mut img = RgbaImage::new(4, 4);
        draw_text_outlined(
            &mut img,
            -6,
            -6,
            "12-B",
            Rgba([255, 0, 0, 255]),
            Rgba([255, 255, 255, 255]),
            2,
        );
    }
}
