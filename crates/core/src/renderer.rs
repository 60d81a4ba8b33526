//! Letter compositing and PNG export.
//!
//! [`LetterRenderer::render`] is a pure function of the [`RenderConfig`]
//! and the on-disk assets: same config + same assets gives a byte-identical
//! image. Hosts call it on every observed field change and either display
//! the raster or persist it via [`LetterRenderer::render_and_save`].

use crate::assets::AssetLibrary;
use crate::config::{GiftCaptionPosition, RenderConfig};
use crate::error::{RenderError, Result};
use crate::text::{draw_text, text_width, wrap_text};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rusttype::Font;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Ink color for all drawn text.
pub const INK_COLOR: Rgba<u8> = Rgba([60, 40, 20, 255]);

/// Extra pixels between wrapped lines, on top of the font size.
const LINE_GAP: i32 = 4;
/// Vertical gap between the title block and the body block.
const TITLE_BODY_GAP: i32 = 10;
/// How far the signature anchor sits above the bottom margin.
const SIGNATURE_RISE: i32 = 80;
/// How far the gift block anchor sits above the bottom margin.
const GIFT_RISE: i32 = 30;

/// A rendered letter encoded as PNG, for host preview or export.
#[derive(Debug, Clone)]
pub struct RenderedLetter {
    /// PNG image data.
    pub data: Vec<u8>,
    /// Pixel width (always the background's width).
    pub width: u32,
    /// Pixel height (always the background's height).
    pub height: u32,
    /// Path the PNG was written to (if saved to disk).
    pub output_path: Option<PathBuf>,
}

/// Composites letter text and gift art onto a background image.
pub struct LetterRenderer {
    /// Asset resolver for backgrounds, gift icons and the font.
    assets: AssetLibrary,
}

impl LetterRenderer {
    /// Create a renderer over the given asset library.
    pub fn new(assets: AssetLibrary) -> Self {
        Self { assets }
    }

    /// The renderer's asset library.
    pub fn assets(&self) -> &AssetLibrary {
        &self.assets
    }

    /// Render the letter described by `config` onto its background.
    ///
    /// The output always has the background's exact dimensions. Fails with
    /// [`RenderError::AssetNotFound`] / [`RenderError::DecodeError`] when an
    /// asset is missing or unreadable; nothing is partially rendered.
    pub fn render(&self, config: &RenderConfig) -> Result<RgbaImage> {
        config.validate()?;
        let start = Instant::now();

        let mut base = self.assets.load_background(&config.background_image)?;
        let font = self.assets.load_font()?;

        let layout = &config.layout;
        let font_px = layout.font_size as f32;
        let margin_h = layout.margin_horizontal as i32;
        // Signed: wide margins on a narrow background degenerate to one
        // character per line instead of underflowing.
        let max_text_width = (base.width() as i32 - 2 * margin_h) as f32;
        let pitch = line_pitch(layout.font_size);
        let measure = |s: &str| text_width(&font, font_px, s);

        // Title, left-aligned from the top margin.
        let title_lines = wrap_text(&config.title, max_text_width, measure);
        for (idx, line) in title_lines.iter().enumerate() {
            let y = layout.margin_top as i32 + idx as i32 * pitch;
            draw_text(&mut base, &font, font_px, margin_h, y, INK_COLOR, line);
        }

        // Body continues below the title.
        let mut y = body_start_y(layout.margin_top, layout.font_size, title_lines.len());
        for line in &wrap_text(&config.body, max_text_width, measure) {
            draw_text(&mut base, &font, font_px, margin_h, y, INK_COLOR, line);
            y += pitch;
        }

        // Signature, right-aligned, anchored from the bottom edge
        // independently of the title/body flow.
        let sign_y = signature_anchor_y(base.height(), layout.margin_bottom);
        let sign_lines = wrap_text(&config.signature, max_text_width, measure);
        for (idx, line) in sign_lines.iter().enumerate() {
            let w = text_width(&font, font_px, line).round() as i32;
            let x = base.width() as i32 - margin_h - w;
            let y = sign_y + idx as i32 * pitch;
            draw_text(&mut base, &font, font_px, x, y, INK_COLOR, line);
        }

        if let Some(icon_name) = config.gift.icon.as_deref() {
            self.draw_gift_block(&mut base, &font, config, icon_name)?;
        }

        debug!(
            "Rendered '{}' ({}x{}) in {:?}",
            config.background_image,
            base.width(),
            base.height(),
            start.elapsed()
        );
        Ok(base)
    }

    /// Render and encode to PNG bytes, for host preview.
    pub fn render_png(&self, config: &RenderConfig) -> Result<RenderedLetter> {
        let image = self.render(config)?;
        let data = encode_png(&image)?;
        Ok(RenderedLetter {
            width: image.width(),
            height: image.height(),
            data,
            output_path: None,
        })
    }

    /// Render and write a PNG file at `path`, creating parent directories
    /// as needed.
    pub fn render_and_save(&self, config: &RenderConfig, path: &Path) -> Result<RenderedLetter> {
        let mut letter = self.render_png(config)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RenderError::ExportError {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }
        std::fs::write(path, &letter.data).map_err(|e| RenderError::ExportError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        letter.output_path = Some(path.to_path_buf());

        info!(
            "Saved letter to {} ({}x{})",
            path.display(),
            letter.width,
            letter.height
        );
        Ok(letter)
    }

    /// Draw the centered icon + caption unit near the bottom of the letter.
    fn draw_gift_block(
        &self,
        base: &mut RgbaImage,
        font: &Font<'_>,
        config: &RenderConfig,
        icon_name: &str,
    ) -> Result<()> {
        let gift = &config.gift;
        let icon = self.assets.load_gift_icon(icon_name)?;
        let icon = imageops::resize(&icon, gift.icon_size, gift.icon_size, FilterType::Triangle);

        let caption = config.gift_caption.as_str();
        let caption_px = gift.caption_font_size as f32;
        let caption_width = text_width(font, caption_px, caption).round() as i32;

        let geometry = gift_geometry(
            base.width(),
            gift.icon_size,
            caption_width,
            gift.caption_gap,
            !caption.is_empty(),
            gift.caption_position,
        );

        let y_gift = base.height() as i32 - config.layout.margin_bottom as i32 - GIFT_RISE;
        // Caption is vertically centered against the icon.
        let caption_y = y_gift + (gift.icon_size as i32 - gift.caption_font_size as i32) / 2;

        debug!(
            "Gift block: {} px wide at x={}, y={}",
            geometry.total_width, geometry.x_start, y_gift
        );

        if !caption.is_empty() && gift.caption_position == GiftCaptionPosition::BeforeIcon {
            draw_text(
                base,
                font,
                caption_px,
                geometry.caption_x,
                caption_y,
                INK_COLOR,
                caption,
            );
            imageops::overlay(base, &icon, i64::from(geometry.icon_x), i64::from(y_gift));
        } else {
            imageops::overlay(base, &icon, i64::from(geometry.icon_x), i64::from(y_gift));
            draw_text(
                base,
                font,
                caption_px,
                geometry.caption_x,
                caption_y,
                INK_COLOR,
                caption,
            );
        }
        Ok(())
    }
}

/// Vertical distance between the tops of consecutive wrapped lines.
fn line_pitch(font_size: u32) -> i32 {
    font_size as i32 + LINE_GAP
}

/// Y coordinate of the body's first line, below `title_line_count` title
/// lines.
fn body_start_y(margin_top: u32, font_size: u32, title_line_count: usize) -> i32 {
    margin_top as i32 + title_line_count as i32 * line_pitch(font_size) + TITLE_BODY_GAP
}

/// Y coordinate the signature block is anchored at.
fn signature_anchor_y(background_height: u32, margin_bottom: u32) -> i32 {
    background_height as i32 - margin_bottom as i32 - SIGNATURE_RISE
}

/// Horizontal placement of the gift block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GiftGeometry {
    /// Left edge of the whole block.
    x_start: i32,
    /// Left edge of the icon.
    icon_x: i32,
    /// Left edge of the caption.
    caption_x: i32,
    /// Icon plus caption plus gap, when a caption is present.
    total_width: i32,
}

/// Center the icon + caption unit on the background.
///
/// The gap and caption width only count when a caption is present; an
/// absent caption centers the bare icon.
fn gift_geometry(
    background_width: u32,
    icon_size: u32,
    caption_width: i32,
    gap: u32,
    has_caption: bool,
    position: GiftCaptionPosition,
) -> GiftGeometry {
    let icon_w = icon_size as i32;
    let total_width = if has_caption {
        icon_w + caption_width + gap as i32
    } else {
        icon_w
    };
    let x_start = (background_width as i32 - total_width) / 2;

    let (icon_x, caption_x) = if has_caption && position == GiftCaptionPosition::BeforeIcon {
        (x_start + caption_width + gap as i32, x_start)
    } else {
        (x_start, x_start + icon_w + gap as i32)
    };

    GiftGeometry {
        x_start,
        icon_x,
        caption_x,
        total_width,
    }
}

/// Encode an RGBA image to PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());

    let mut encoder = png::Encoder::new(&mut buffer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);

    let mut writer = encoder.write_header().map_err(|e| {
        RenderError::PngEncodingError(format!("Failed to write PNG header: {}", e))
    })?;
    writer
        .write_image_data(image.as_raw())
        .map_err(|e| RenderError::PngEncodingError(format!("Failed to write PNG data: {}", e)))?;
    drop(writer);

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    // ========== Block geometry tests ==========

    #[test]
    fn test_line_pitch_is_font_size_plus_gap() {
        assert_eq!(line_pitch(36), 40);
        assert_eq!(line_pitch(10), 14);
    }

    #[test]
    fn test_body_start_y_scenario() {
        // margins 64, font 36, one title line: body starts at 64 + 40 + 10.
        assert_eq!(body_start_y(64, 36, 1), 114);
        // The second body line then sits one pitch lower.
        assert_eq!(body_start_y(64, 36, 1) + line_pitch(36), 154);
    }

    #[test]
    fn test_body_start_y_multiple_title_lines() {
        assert_eq!(body_start_y(64, 36, 3), 64 + 3 * 40 + 10);
    }

    #[test]
    fn test_signature_anchor_y() {
        assert_eq!(signature_anchor_y(600, 64), 456);
        assert_eq!(signature_anchor_y(600, 81), 439);
    }

    #[test]
    fn test_gift_geometry_after_icon() {
        // icon 64, caption 100, gap 10 on an 800 px background
        let g = gift_geometry(800, 64, 100, 10, true, GiftCaptionPosition::AfterIcon);
        assert_eq!(g.total_width, 174);
        assert_eq!(g.x_start, 313);
        assert_eq!(g.icon_x, g.x_start);
        assert_eq!(g.caption_x, g.x_start + 64 + 10);
    }

    #[test]
    fn test_gift_geometry_before_icon() {
        let g = gift_geometry(800, 64, 100, 10, true, GiftCaptionPosition::BeforeIcon);
        assert_eq!(g.caption_x, g.x_start);
        assert_eq!(g.icon_x, g.x_start + 100 + 10);
    }

    #[test]
    fn test_gift_geometry_is_centered() {
        for bg_width in [800u32, 801, 640] {
            let g = gift_geometry(bg_width, 64, 100, 10, true, GiftCaptionPosition::AfterIcon);
            let slack = bg_width as i32 - (2 * g.x_start + g.total_width);
            assert!(
                (0..=1).contains(&slack),
                "off-center by {} on width {}",
                slack,
                bg_width
            );
        }
    }

    #[test]
    fn test_gift_geometry_without_caption_centers_bare_icon() {
        let g = gift_geometry(800, 64, 0, 10, false, GiftCaptionPosition::BeforeIcon);
        assert_eq!(g.total_width, 64);
        assert_eq!(g.x_start, 368);
        // Empty caption falls back to icon-first placement.
        assert_eq!(g.icon_x, g.x_start);
    }

    #[test]
    fn test_gift_geometry_wider_than_background() {
        // Oversized block centers negative; the drawing code clips.
        let g = gift_geometry(100, 64, 100, 10, true, GiftCaptionPosition::AfterIcon);
        assert!(g.x_start < 0);
    }

    // ========== encode_png tests ==========

    #[test]
    fn test_encode_png_magic_bytes() {
        let mut image = RgbaImage::new(10, 10);
        for pixel in image.pixels_mut() {
            *pixel = Rgba([255, 0, 0, 255]);
        }

        let png_data = encode_png(&image).unwrap();

        assert!(png_data.len() > 8);
        assert_eq!(
            &png_data[0..8],
            &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
        );
    }

    #[test]
    fn test_encode_png_round_trips_dimensions() {
        let image = RgbaImage::new(37, 19);
        let png_data = encode_png(&image).unwrap();

        let decoded = image::load_from_memory(&png_data).unwrap();
        assert_eq!(decoded.width(), 37);
        assert_eq!(decoded.height(), 19);
    }

    #[test]
    fn test_encode_png_preserves_alpha() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([10, 20, 30, 128]));

        let png_data = encode_png(&image).unwrap();
        let decoded = image::load_from_memory(&png_data).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([10, 20, 30, 128]));
    }

    #[test]
    fn test_ink_color_is_opaque() {
        assert_eq!(INK_COLOR.0[3], 255);
    }
}
