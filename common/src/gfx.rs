//! Drawing helpers and the 5x7 bitmap font.
//!
//! All helpers are generic over `DrawTarget<Color = BinaryColor>` so the same
//! program code draws into the firmware [`Framebuffer`](crate::Framebuffer)
//! and into the simulator window. Draw errors are ignored (`.ok()`), the
//! framebuffer target is infallible.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use heapless::String;

use crate::config::SCREEN_WIDTH;

/// Horizontal advance per character (5px glyph + 1px spacing).
pub const CHAR_ADVANCE: i32 = 6;

/// Glyph height in pixels.
pub const CHAR_HEIGHT: i32 = 7;

#[inline]
const fn color(on: bool) -> BinaryColor {
    if on { BinaryColor::On } else { BinaryColor::Off }
}

/// Set or clear a single pixel.
#[inline]
pub fn plot<D>(
    display: &mut D,
    x: i32,
    y: i32,
    on: bool,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    display.draw_iter(core::iter::once(Pixel(Point::new(x, y), color(on)))).ok();
}

/// Horizontal line `w` pixels long starting at (x, y).
pub fn hline<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: i32,
    on: bool,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    fill_rect(display, x, y, w, 1, on);
}

/// Filled rectangle. Non-positive sizes draw nothing.
pub fn fill_rect<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    on: bool,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    if w <= 0 || h <= 0 {
        return;
    }
    Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
        .into_styled(PrimitiveStyle::with_fill(color(on)))
        .draw(display)
        .ok();
}

/// Draw an ASCII-art sprite.
///
/// `'#'`, `'1'` and `'X'` set a pixel, anything else is transparent. At most
/// `w` columns and `h` rows are drawn; short rows are clipped.
pub fn sprite_rows<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: usize,
    h: usize,
    rows: &[&str],
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let pixels = rows.iter().take(h).enumerate().flat_map(|(r, line)| {
        line.bytes()
            .take(w)
            .enumerate()
            .filter(|&(_, ch)| matches!(ch, b'#' | b'1' | b'X'))
            .map(move |(c, _)| Pixel(Point::new(x + c as i32, y + r as i32), BinaryColor::On))
    });
    display.draw_iter(pixels).ok();
}

// =============================================================================
// 5x7 Font
// =============================================================================

// Each glyph is 5 columns, LSB = top row.
static FONT_AZ: [[u8; 5]; 26] = [
    [0x7E, 0x11, 0x11, 0x7E, 0x00], // A
    [0x7F, 0x49, 0x49, 0x36, 0x00], // B
    [0x3E, 0x41, 0x41, 0x22, 0x00], // C
    [0x7F, 0x41, 0x41, 0x3E, 0x00], // D
    [0x7F, 0x49, 0x49, 0x41, 0x00], // E
    [0x7F, 0x09, 0x09, 0x01, 0x00], // F
    [0x3E, 0x41, 0x51, 0x32, 0x00], // G
    [0x7F, 0x08, 0x08, 0x7F, 0x00], // H
    [0x41, 0x7F, 0x41, 0x00, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x00], // J
    [0x7F, 0x08, 0x14, 0x63, 0x00], // K
    [0x7F, 0x40, 0x40, 0x40, 0x00], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x7F, 0x00], // N
    [0x3E, 0x41, 0x41, 0x3E, 0x00], // O
    [0x7F, 0x09, 0x09, 0x06, 0x00], // P
    [0x3E, 0x41, 0x61, 0x3E, 0x00], // Q
    [0x7F, 0x09, 0x19, 0x66, 0x00], // R
    [0x26, 0x49, 0x49, 0x32, 0x00], // S
    [0x01, 0x7F, 0x01, 0x01, 0x00], // T
    [0x3F, 0x40, 0x40, 0x3F, 0x00], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
];

static FONT_DIGITS: [[u8; 5]; 10] = [
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x22, 0x41, 0x49, 0x49, 0x36], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x2F, 0x49, 0x49, 0x49, 0x31], // 5
    [0x3E, 0x49, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x49, 0x3E], // 9
];

static GLYPH_BLANK: [u8; 5] = [0x00; 5];
static GLYPH_COLON: [u8; 5] = [0x00, 0x36, 0x36, 0x00, 0x00];
static GLYPH_BANG: [u8; 5] = [0x00, 0x00, 0x5F, 0x00, 0x00];
static GLYPH_DASH: [u8; 5] = [0x08, 0x08, 0x08, 0x08, 0x08];
static GLYPH_DOT: [u8; 5] = [0x00, 0x60, 0x60, 0x00, 0x00];

/// Column bitmap for a character. Unknown characters map to a blank glyph.
pub fn glyph(ch: char) -> &'static [u8; 5] {
    match ch {
        'A'..='Z' => &FONT_AZ[ch as usize - 'A' as usize],
        'a'..='z' => &FONT_AZ[ch as usize - 'a' as usize],
        '0'..='9' => &FONT_DIGITS[ch as usize - '0' as usize],
        ':' => &GLYPH_COLON,
        '!' => &GLYPH_BANG,
        '-' => &GLYPH_DASH,
        '.' => &GLYPH_DOT,
        _ => &GLYPH_BLANK,
    }
}

/// Draw one 5x7 character with its top-left corner at (x, y).
///
/// Only the glyph's set bits are drawn in `on`; the cell background is left
/// untouched, which is what lets the menu draw unlit text over a lit bar.
pub fn char5x7<D>(
    display: &mut D,
    x: i32,
    y: i32,
    ch: char,
    on: bool,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let bits = glyph(ch);
    let pixels = (0..5).flat_map(move |col| {
        (0..CHAR_HEIGHT)
            .filter(move |&row| bits[col] & (1u8 << row) != 0)
            .map(move |row| Pixel(Point::new(x + col as i32, y + row), color(on)))
    });
    display.draw_iter(pixels).ok();
}

/// Draw a string with a fixed 6-pixel advance.
pub fn text5x7<D>(
    display: &mut D,
    x: i32,
    y: i32,
    text: &str,
    on: bool,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut cx = x;
    for ch in text.chars() {
        if ch != ' ' {
            char5x7(display, cx, y, ch, on);
        }
        cx += CHAR_ADVANCE;
    }
}

/// Width in pixels of `text` as laid out by [`text5x7`].
#[inline]
pub fn text_width(text: &str) -> i32 { text.chars().count() as i32 * CHAR_ADVANCE }

/// Draw lit text horizontally centered on the screen.
pub fn draw_center_text<D>(
    display: &mut D,
    text: &str,
    y: i32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let x = (SCREEN_WIDTH as i32 - text_width(text)) / 2;
    text5x7(display, x, y, text, true);
}

// =============================================================================
// Number Formatting
// =============================================================================

/// Push a u32 value to a heapless string (no format! macro).
pub fn push_u32<const N: usize>(
    s: &mut String<N>,
    mut val: u32,
) {
    if val == 0 {
        s.push('0').ok();
        return;
    }

    // Build digits in reverse
    let mut digits = [0u8; 10];
    let mut i = 0;
    while val > 0 {
        digits[i] = (val % 10) as u8;
        val /= 10;
        i += 1;
    }

    while i > 0 {
        i -= 1;
        s.push((b'0' + digits[i]) as char).ok();
    }
}

/// `prefix` followed by `val`, e.g. `labeled_u32("HI ", 42)` → `"HI 42"`.
pub fn labeled_u32<const N: usize>(
    prefix: &str,
    val: u32,
) -> String<N> {
    let mut s = String::new();
    s.push_str(prefix).ok();
    push_u32(&mut s, val);
    s
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Framebuffer;

    #[test]
    fn test_plot_and_hline() {
        let mut fb = Framebuffer::new();
        plot(&mut fb, 3, 4, true);
        assert!(fb.pixel(3, 4));
        hline(&mut fb, 0, 10, 8, true);
        assert_eq!(fb.lit_pixels(), 9);
        assert!(fb.pixel(7, 10));
        assert!(!fb.pixel(8, 10));
    }

    #[test]
    fn test_fill_rect_on_and_off() {
        let mut fb = Framebuffer::new();
        fill_rect(&mut fb, 0, 0, 4, 4, true);
        assert_eq!(fb.lit_pixels(), 16);
        fill_rect(&mut fb, 1, 1, 2, 2, false);
        assert_eq!(fb.lit_pixels(), 12);
        fill_rect(&mut fb, 0, 0, 0, 10, true);
        fill_rect(&mut fb, 0, 0, 10, -1, true);
        assert_eq!(fb.lit_pixels(), 12);
    }

    #[test]
    fn test_sprite_rows_marks() {
        let mut fb = Framebuffer::new();
        let rows = ["#.1", ".X.", "..."];
        sprite_rows(&mut fb, 10, 10, 3, 3, &rows);
        assert_eq!(fb.lit_pixels(), 3);
        assert!(fb.pixel(10, 10));
        assert!(fb.pixel(12, 10));
        assert!(fb.pixel(11, 11));
    }

    #[test]
    fn test_sprite_rows_clips_short_and_long_rows() {
        let mut fb = Framebuffer::new();
        let rows = ["#", "#####", "##"];
        // Width 3 cuts the long row, height 2 drops the last row
        sprite_rows(&mut fb, 0, 0, 3, 2, &rows);
        assert_eq!(fb.lit_pixels(), 4);
        assert!(!fb.pixel(3, 1));
        assert!(!fb.pixel(0, 2));
    }

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph('A'), &FONT_AZ[0]);
        assert_eq!(glyph('z'), &FONT_AZ[25]);
        assert_eq!(glyph('7'), &FONT_DIGITS[7]);
        assert_eq!(glyph('~'), &GLYPH_BLANK);
        assert_eq!(glyph(':'), &GLYPH_COLON);
    }

    #[test]
    fn test_char_matches_bitmap() {
        let mut fb = Framebuffer::new();
        char5x7(&mut fb, 0, 0, 'I', true);
        // I = 0x41, 0x7F, 0x41: vertical bar in column 1, serifs at rows 0 and 6
        for row in 0..7 {
            assert!(fb.pixel(1, row));
        }
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(0, 6));
        assert!(!fb.pixel(0, 3));
        assert!(!fb.pixel(3, 0));
        assert_eq!(fb.lit_pixels(), 11);
    }

    #[test]
    fn test_unlit_text_over_lit_bar() {
        let mut fb = Framebuffer::new();
        fill_rect(&mut fb, 0, 0, 128, 8, true);
        char5x7(&mut fb, 0, 0, 'I', false);
        assert!(!fb.pixel(1, 3));
        assert!(fb.pixel(3, 3));
        assert_eq!(fb.lit_pixels(), 128 * 8 - 11);
    }

    #[test]
    fn test_text_advance_and_spaces() {
        let mut a = Framebuffer::new();
        text5x7(&mut a, 0, 0, "A B", true);
        let mut b = Framebuffer::new();
        char5x7(&mut b, 0, 0, 'A', true);
        char5x7(&mut b, 12, 0, 'B', true);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_lowercase_renders_as_uppercase() {
        let mut a = Framebuffer::new();
        text5x7(&mut a, 0, 0, "dino", true);
        let mut b = Framebuffer::new();
        text5x7(&mut b, 0, 0, "DINO", true);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("GAME OVER"), 54);
    }

    #[test]
    fn test_center_text_is_centered() {
        let mut fb = Framebuffer::new();
        // "I" is 6px wide: drawn at x = 61, bar in column 62
        draw_center_text(&mut fb, "I", 0);
        assert!(fb.pixel(62, 3));
    }

    #[test]
    fn test_push_u32() {
        let mut s: String<16> = String::new();
        push_u32(&mut s, 0);
        assert_eq!(s.as_str(), "0");

        let mut s: String<16> = String::new();
        push_u32(&mut s, 4_294_967_295);
        assert_eq!(s.as_str(), "4294967295");
    }

    #[test]
    fn test_labeled_u32() {
        let s: String<16> = labeled_u32("SCORE: ", 120);
        assert_eq!(s.as_str(), "SCORE: 120");
    }
}
