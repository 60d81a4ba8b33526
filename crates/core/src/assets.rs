//! Asset resolution: background images, gift icons and the letter font.
//!
//! Hosts construct one [`AssetLibrary`] for their asset directories and font
//! file and hand it to the renderer. Nothing here is global state; two
//! libraries pointing at different directories coexist fine.

use crate::error::{RenderError, Result};
use crate::is_supported_image_extension;
use image::RgbaImage;
use rusttype::Font;
use std::path::{Path, PathBuf};

/// Resolves asset names to decoded images and provides the letter font.
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    /// Directory holding letter background images.
    backgrounds_dir: PathBuf,
    /// Directory holding gift icon images.
    gift_icons_dir: PathBuf,
    /// Path to the TrueType font used for all text.
    font_path: PathBuf,
}

impl AssetLibrary {
    /// Create a library over the given directories and font file.
    ///
    /// Paths are not touched until an asset is listed or loaded, so a
    /// library for a not-yet-populated directory can be constructed freely.
    pub fn new(
        backgrounds_dir: impl Into<PathBuf>,
        gift_icons_dir: impl Into<PathBuf>,
        font_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            backgrounds_dir: backgrounds_dir.into(),
            gift_icons_dir: gift_icons_dir.into(),
            font_path: font_path.into(),
        }
    }

    /// Directory holding letter background images.
    pub fn backgrounds_dir(&self) -> &Path {
        &self.backgrounds_dir
    }

    /// Directory holding gift icon images.
    pub fn gift_icons_dir(&self) -> &Path {
        &self.gift_icons_dir
    }

    /// Path to the TrueType font used for all text.
    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// List background image file names, sorted for a stable host ordering.
    pub fn list_backgrounds(&self) -> Result<Vec<String>> {
        list_images(&self.backgrounds_dir)
    }

    /// List gift icon file names, sorted for a stable host ordering.
    pub fn list_gift_icons(&self) -> Result<Vec<String>> {
        list_images(&self.gift_icons_dir)
    }

    /// Load a background image by file name and convert it to RGBA.
    pub fn load_background(&self, name: &str) -> Result<RgbaImage> {
        load_image(&self.backgrounds_dir.join(name))
    }

    /// Load a gift icon by file name and convert it to RGBA.
    pub fn load_gift_icon(&self, name: &str) -> Result<RgbaImage> {
        load_image(&self.gift_icons_dir.join(name))
    }

    /// Load and parse the letter font.
    ///
    /// Loaded per render; renders stay a pure function of the config and
    /// the on-disk assets.
    pub fn load_font(&self) -> Result<Font<'static>> {
        if !self.font_path.exists() {
            return Err(RenderError::AssetNotFound(self.font_path.clone()));
        }
        let bytes = std::fs::read(&self.font_path).map_err(|e| RenderError::DecodeError {
            path: self.font_path.clone(),
            message: e.to_string(),
        })?;
        Font::try_from_vec(bytes).ok_or_else(|| RenderError::DecodeError {
            path: self.font_path.clone(),
            message: "not a parseable TrueType font".to_string(),
        })
    }
}

/// List supported raster files in a directory, sorted by name.
fn list_images(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(RenderError::AssetNotFound(dir.to_path_buf()));
    }
    let entries = std::fs::read_dir(dir).map_err(|e| RenderError::DecodeError {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut names = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .map(is_supported_image_extension)
            .unwrap_or(false);
        if !supported {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Load a raster file and convert it to RGBA.
fn load_image(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        return Err(RenderError::AssetNotFound(path.to_path_buf()));
    }
    let img = image::open(path).map_err(|e| RenderError::DecodeError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(img.to_rgba8())
}
