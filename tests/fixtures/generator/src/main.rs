//! Test fixture generator for letter-to-png.
//!
//! This binary generates letter backgrounds and gift icons programmatically
//! for use in unit and integration tests, plus deliberately broken files
//! for the error paths.

use anyhow::Result;
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    let output_dir = Path::new("tests/fixtures/output");
    let backgrounds_dir = output_dir.join("mail_img");
    let icons_dir = output_dir.join("gift_img");
    fs::create_dir_all(&backgrounds_dir)?;
    fs::create_dir_all(&icons_dir)?;

    println!("Generating test fixtures...\n");

    // Letter backgrounds
    generate_background(&backgrounds_dir, "regular_horizontal.png", 800, 600)?;
    generate_background(&backgrounds_dir, "regular_vertical.png", 600, 800)?;
    generate_background(&backgrounds_dir, "small.png", 200, 150)?;
    generate_jpeg_background(&backgrounds_dir, "photo_paper.jpg", 640, 480)?;

    // Gift icons
    generate_icon(&icons_dir, "berry.png", 64, Rgba([170, 40, 80, 255]))?;
    generate_icon(&icons_dir, "gem.png", 48, Rgba([60, 170, 200, 255]))?;
    generate_icon(&icons_dir, "large_gift.png", 256, Rgba([200, 150, 40, 255]))?;

    // Error test files
    generate_corrupt_png(&backgrounds_dir)?;

    println!("\nAll fixtures generated successfully!");
    Ok(())
}

/// Generate a parchment-colored letter background with a darker border.
fn generate_background(dir: &Path, name: &str, width: u32, height: u32) -> Result<()> {
    let path = dir.join(name);
    println!("  Creating: {}", path.display());

    let parchment = Rgba([222, 203, 164, 255]);
    let border = Rgba([166, 124, 82, 255]);

    let mut img = RgbaImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let on_border = x < 8 || y < 8 || x >= width - 8 || y >= height - 8;
        *pixel = if on_border { border } else { parchment };
    }
    img.save(&path)?;
    Ok(())
}

/// Generate a JPEG background so the jpg decode path gets exercised.
fn generate_jpeg_background(dir: &Path, name: &str, width: u32, height: u32) -> Result<()> {
    let path = dir.join(name);
    println!("  Creating: {}", path.display());

    let mut img = image::RgbImage::new(width, height);
    for (_, y, pixel) in img.enumerate_pixels_mut() {
        let shade = 200 + ((y * 40) / height) as u8;
        *pixel = image::Rgb([shade, shade.saturating_sub(20), 150]);
    }
    img.save(&path)?;
    Ok(())
}

/// Generate a round gift icon with transparent corners.
fn generate_icon(dir: &Path, name: &str, size: u32, color: Rgba<u8>) -> Result<()> {
    let path = dir.join(name);
    println!("  Creating: {}", path.display());

    let mut img = RgbaImage::new(size, size);
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0;
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        *pixel = if dx * dx + dy * dy <= radius * radius {
            color
        } else {
            Rgba([0, 0, 0, 0])
        };
    }
    img.save(&path)?;
    Ok(())
}

/// Write a file with a PNG extension but garbage contents.
fn generate_corrupt_png(dir: &Path) -> Result<()> {
    let path = dir.join("corrupt.png");
    println!("  Creating: {}", path.display());

    fs::write(&path, b"this is not a png file")?;
    Ok(())
}
