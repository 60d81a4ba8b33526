//! # letter-to-png-core
//!
//! Letter text layout and image compositing library.
//!
//! Given a background image, a TrueType font and a set of text fields, this
//! library word-wraps each text block, positions the title, body, signature
//! and optional gift regions according to fixed layout rules, rasterizes
//! everything onto the background and exports the result as PNG:
//!
//! - **image** for decoding, resizing and compositing raster assets
//! - **rusttype** for font parsing, text measurement and glyph coverage
//! - **png** for encoding the exported artifact
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use letter_to_png_core::{AssetLibrary, LetterRenderer, RenderConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let assets = AssetLibrary::new("assets/mail_img", "assets/gift_img", "assets/font.ttf");
//!     let renderer = LetterRenderer::new(assets);
//!
//!     let config = RenderConfig::new("regular_horizontal.png")
//!         .title("Dear farmer,")
//!         .body("The crows got into the corn again.\nBring a scarecrow.")
//!         .signature("Lewis");
//!
//!     let letter = renderer.render_and_save(&config, "mail.png".as_ref())?;
//!     println!("Wrote {}x{} letter", letter.width, letter.height);
//!     Ok(())
//! }
//! ```
//!
//! ## Live preview
//!
//! ```rust,no_run
//! use letter_to_png_core::{AssetLibrary, GiftConfig, LetterRenderer, RenderConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let assets = AssetLibrary::new("assets/mail_img", "assets/gift_img", "assets/font.ttf");
//!     let renderer = LetterRenderer::new(assets);
//!
//!     // The host rebuilds the config on every field change and redraws
//!     // from the returned raster; rendering holds no state between calls.
//!     let config = RenderConfig::new("regular_horizontal.png")
//!         .gift_caption("Salmonberry x5")
//!         .gift(GiftConfig::with_icon("salmonberry.png"));
//!     let image = renderer.render(&config)?;
//!     println!("Preview is {}x{}", image.width(), image.height());
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod renderer;
pub mod text;

// Re-export main types for convenience
pub use assets::AssetLibrary;
pub use config::{GiftCaptionPosition, GiftConfig, LayoutConfig, RenderConfig};
pub use error::{RenderError, Result};
pub use renderer::{LetterRenderer, RenderedLetter, INK_COLOR};
pub use text::{text_width, wrap_text};

/// Raster file extensions assets may use.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Check if a file extension is a supported raster format.
pub fn is_supported_image_extension(ext: &str) -> bool {
    SUPPORTED_IMAGE_EXTENSIONS
        .iter()
        .any(|&e| e.eq_ignore_ascii_case(ext))
}

/// Initialize the library's logging.
/// Call this once at application startup if you want to see logs.
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image_extension("png"));
        assert!(is_supported_image_extension("PNG"));
        assert!(is_supported_image_extension("jpeg"));
        assert!(is_supported_image_extension("Jpg"));
        assert!(!is_supported_image_extension("gif"));
        assert!(!is_supported_image_extension("ttf"));
    }
}
