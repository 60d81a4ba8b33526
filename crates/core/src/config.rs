//! Configuration types for letter rendering.

use serde::{Deserialize, Serialize};

/// Where the gift caption sits relative to the gift icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftCaptionPosition {
    /// Caption, then gap, then icon.
    BeforeIcon,
    /// Icon, then gap, then caption.
    AfterIcon,
}

/// Text sizing and page margins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Font size for title, body and signature, in pixels.
    /// Default: 36.
    pub font_size: u32,

    /// Extra spacing between characters, in pixels.
    /// Reserved: collected from hosts but not applied by the layout math.
    /// Default: 2.
    pub letter_spacing: u32,

    /// Top margin in pixels.
    /// Default: 64.
    pub margin_top: u32,

    /// Bottom margin in pixels.
    /// Default: 81.
    pub margin_bottom: u32,

    /// Left and right margin in pixels.
    /// Default: 64.
    pub margin_horizontal: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_size: 36,
            letter_spacing: 2,
            margin_top: 64,
            margin_bottom: 81,
            margin_horizontal: 64,
        }
    }
}

impl LayoutConfig {
    /// Create a layout config with the specified font size.
    pub fn with_font_size(font_size: u32) -> Self {
        Self {
            font_size,
            ..Default::default()
        }
    }

    /// Set the top margin.
    pub fn margin_top(mut self, px: u32) -> Self {
        self.margin_top = px;
        self
    }

    /// Set the bottom margin.
    pub fn margin_bottom(mut self, px: u32) -> Self {
        self.margin_bottom = px;
        self
    }

    /// Set the horizontal margin.
    pub fn margin_horizontal(mut self, px: u32) -> Self {
        self.margin_horizontal = px;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.font_size == 0 {
            return Err(crate::error::RenderError::InvalidConfig(
                "font_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Gift block settings: the icon and its caption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftConfig {
    /// Gift icon file name, resolved against the gift icon directory.
    /// `None` suppresses the gift block entirely.
    /// Default: None.
    pub icon: Option<String>,

    /// Edge length the icon is resized to, in pixels.
    /// Default: 64.
    pub icon_size: u32,

    /// Font size for the caption, in pixels.
    /// Default: 30.
    pub caption_font_size: u32,

    /// Gap between caption and icon, in pixels.
    /// Default: 10.
    pub caption_gap: u32,

    /// Caption placement relative to the icon.
    /// Default: BeforeIcon.
    pub caption_position: GiftCaptionPosition,
}

impl Default for GiftConfig {
    fn default() -> Self {
        Self {
            icon: None,
            icon_size: 64,
            caption_font_size: 30,
            caption_gap: 10,
            caption_position: GiftCaptionPosition::BeforeIcon,
        }
    }
}

impl GiftConfig {
    /// Create a gift config with the specified icon file name.
    pub fn with_icon(icon: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
            ..Default::default()
        }
    }

    /// Set the icon edge length.
    pub fn icon_size(mut self, px: u32) -> Self {
        self.icon_size = px;
        self
    }

    /// Set the caption font size.
    pub fn caption_font_size(mut self, px: u32) -> Self {
        self.caption_font_size = px;
        self
    }

    /// Set the caption-to-icon gap.
    pub fn caption_gap(mut self, px: u32) -> Self {
        self.caption_gap = px;
        self
    }

    /// Set the caption placement.
    pub fn caption_position(mut self, position: GiftCaptionPosition) -> Self {
        self.caption_position = position;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.icon_size == 0 {
            return Err(crate::error::RenderError::InvalidConfig(
                "icon_size must be at least 1".to_string(),
            ));
        }
        if self.caption_font_size == 0 {
            return Err(crate::error::RenderError::InvalidConfig(
                "caption_font_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete description of one letter render.
///
/// Hosts rebuild this record on every field change and hand it to
/// [`crate::renderer::LetterRenderer::render`]; the output depends on
/// nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Letter title, drawn left-aligned from the top margin.
    pub title: String,

    /// Letter body. Explicit `\n` line breaks are preserved.
    pub body: String,

    /// Signature, drawn right-aligned near the bottom.
    pub signature: String,

    /// Caption drawn next to the gift icon.
    pub gift_caption: String,

    /// Background image file name, resolved against the backgrounds
    /// directory.
    pub background_image: String,

    /// Text sizing and margins.
    pub layout: LayoutConfig,

    /// Gift block settings.
    pub gift: GiftConfig,
}

impl RenderConfig {
    /// Create a config for the given background with empty text fields and
    /// default layout.
    pub fn new(background_image: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            signature: String::new(),
            gift_caption: String::new(),
            background_image: background_image.into(),
            layout: LayoutConfig::default(),
            gift: GiftConfig::default(),
        }
    }

    /// Set the title.
    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.title = text.into();
        self
    }

    /// Set the body.
    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.body = text.into();
        self
    }

    /// Set the signature.
    pub fn signature(mut self, text: impl Into<String>) -> Self {
        self.signature = text.into();
        self
    }

    /// Set the gift caption.
    pub fn gift_caption(mut self, text: impl Into<String>) -> Self {
        self.gift_caption = text.into();
        self
    }

    /// Set the layout config.
    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the gift config.
    pub fn gift(mut self, gift: GiftConfig) -> Self {
        self.gift = gift;
        self
    }

    /// Validate the entire configuration.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.background_image.is_empty() {
            return Err(crate::error::RenderError::InvalidConfig(
                "background_image must not be empty".to_string(),
            ));
        }
        self.layout.validate()?;
        self.gift.validate()?;
        Ok(())
    }
}
