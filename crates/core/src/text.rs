//! Text measurement, word-wrap and glyph rasterization.
//!
//! Wrapping is per-character, with no word-boundary awareness: the target
//! content is dense pictographic script where breaking at arbitrary
//! character boundaries is the expected layout.

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

/// Wrap `text` so every line measures at most `max_width` pixels.
///
/// `measure` is the font's text-measurement metric: the rendered pixel
/// width of a candidate line. The split runs per character: each character
/// is appended to the running line and the line is re-measured; when the
/// append would exceed `max_width` and the line is non-empty, the line is
/// closed without the character and the character starts the next line. A
/// single character wider than `max_width` is kept on its own line rather
/// than dropped.
///
/// Explicit `\n` breaks always start a new wrap group, so blank lines in
/// the input survive as empty lines in the output. The returned lines
/// concatenate back to the input text minus the newlines.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for ch in paragraph.chars() {
            let mut candidate = line.clone();
            candidate.push(ch);
            if measure(&candidate) > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line.push(ch);
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

/// Measured pixel width of `text` at scale `px`.
///
/// Width is the rightmost edge over the laid-out glyph bounding boxes, so
/// kerning between neighbours is accounted for and an all-whitespace string
/// measures zero.
pub fn text_width(font: &Font<'_>, px: f32, text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let mut width: f32 = 0.0;
    for g in &glyphs {
        if let Some(bb) = g.pixel_bounding_box() {
            width = width.max(bb.max.x as f32);
        }
    }
    width
}

/// Rasterize `text` onto `img` with its top-left corner at `(x, y)`.
///
/// `y` addresses the top of the text box; the baseline sits one ascent
/// below it. Glyph coverage is alpha-blended over the destination and
/// clipped at the buffer edges.
pub fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let mut caret_x = x as f32;
    let baseline_y = y as f32 + v_metrics.ascent;

    for ch in text.chars() {
        let glyph = font
            .glyph(ch)
            .scaled(scale)
            .positioned(point(caret_x, baseline_y));
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let dx = gx as i32 + bb.min.x;
                let dy = gy as i32 + bb.min.y;
                if dx < 0 || dy < 0 {
                    return;
                }
                let (dx, dy) = (dx as u32, dy as u32);
                if dx >= img.width() || dy >= img.height() {
                    return;
                }
                let a = (v * 255.0) as u8;
                if a == 0 {
                    return;
                }
                let dst = img.get_pixel_mut(dx, dy);
                // src-over blend of the glyph coverage
                let sa = a as f32 / 255.0;
                let inv = 1.0 - sa;
                dst.0[0] = (color.0[0] as f32 * sa + dst.0[0] as f32 * inv) as u8;
                dst.0[1] = (color.0[1] as f32 * sa + dst.0[1] as f32 * inv) as u8;
                dst.0[2] = (color.0[2] as f32 * sa + dst.0[2] as f32 * inv) as u8;
                dst.0[3] = 255;
            });
        }
        caret_x += glyph.unpositioned().h_metrics().advance_width;
    }
}
