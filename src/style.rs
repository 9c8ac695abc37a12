use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{color::Color, error::ConfigError, font_storage::FontSource, text::LineColors};

/// Largest width or height of a rendered overlay, in pixels.
pub const MAX_CANVAS_SIZE: u32 = 16_384;

/// Everything that decides how a list overlay looks.
///
/// A style is built once and only borrowed afterwards; both the measuring
/// and the drawing pass read the same instance. Missing JSON fields take
/// their [`Default`] values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayStyle {
    /// Width of the output image, usually the video width.
    pub canvas_width: f32,
    /// Transparent space between the image edge and the panel.
    pub panel_margin: f32,
    /// Space between the panel edge and the text.
    pub panel_padding: f32,
    pub panel_radius: f32,
    pub panel_color: Color,

    pub highlight_color: Color,
    pub regular_color: Color,
    pub highlight_font: FontSource,
    pub regular_font: FontSource,
    /// Extra directories searched for `system` font families.
    pub font_dirs: Vec<PathBuf>,
    /// Pixel size of the regular font.
    pub font_size: f32,
    /// Pixel size of the highlight font.
    pub highlight_font_size: f32,
    /// Line advance as a multiple of the larger font size.
    pub line_height_scale: f32,
    /// Extra space between two list items.
    pub paragraph_spacing: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            canvas_width: 1080.0,
            panel_margin: 40.0,
            panel_padding: 32.0,
            panel_radius: 24.0,
            panel_color: Color::rgba(0, 0, 0, 179),
            highlight_color: Color::GOLD,
            regular_color: Color::WHITE,
            highlight_font: FontSource::sans_serif(true),
            regular_font: FontSource::sans_serif(false),
            font_dirs: Vec::new(),
            font_size: 40.0,
            highlight_font_size: 40.0,
            line_height_scale: 1.3,
            paragraph_spacing: 16.0,
        }
    }
}

impl OverlayStyle {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let style: Self = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Rejects styles that cannot produce a drawable panel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("font_size", self.font_size),
            ("highlight_font_size", self.highlight_font_size),
            ("line_height_scale", self.line_height_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("panel_margin", self.panel_margin),
            ("panel_padding", self.panel_padding),
            ("panel_radius", self.panel_radius),
            ("paragraph_spacing", self.paragraph_spacing),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if self.canvas_width > MAX_CANVAS_SIZE as f32 {
            return Err(ConfigError::Invalid(format!(
                "canvas_width {} exceeds the {MAX_CANVAS_SIZE}px limit",
                self.canvas_width
            )));
        }

        if self.text_max_width() <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "margins and padding leave no room for text in a {}px canvas",
                self.canvas_width
            )));
        }

        Ok(())
    }

    /// Horizontal space available to each line of text.
    pub fn text_max_width(&self) -> f32 {
        self.canvas_width - 2.0 * (self.panel_margin + self.panel_padding)
    }

    pub fn line_height(&self) -> f32 {
        self.font_size.max(self.highlight_font_size) * self.line_height_scale
    }

    pub fn line_colors(&self) -> LineColors {
        LineColors {
            highlight: self.highlight_color,
            regular: self.regular_color,
        }
    }
}
