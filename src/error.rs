//! Error types shared by the layout engine, font loading and configuration.
//!
//! A single word wider than the line box is never an error; it is drawn as
//! an overflowing run.

use std::path::PathBuf;

/// Failures raised while measuring, laying out or drawing text.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The font provider could not measure or draw a string.
    ///
    /// Not raised by [`FontFace`](crate::font_face::FontFace); meant for other
    /// [`FontMetrics`](crate::font_face::FontMetrics) implementations.
    #[error("failed to measure {text:?}: {reason}")]
    Measure { text: String, reason: String },

    /// The font has no glyph for a visible character.
    #[error("font has no glyph for {ch:?}")]
    MissingGlyph { ch: char },

    /// Nothing was left to draw after blank items were filtered out.
    #[error("overlay has no non-blank items to draw")]
    EmptyOverlay,

    /// The measured overlay does not fit in an image buffer.
    #[error("overlay of {width}x{height} pixels exceeds the {max}px canvas limit")]
    CanvasTooLarge { width: f32, height: f32, max: u32 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Failures raised while loading a font face.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// No face in the database matched the requested families.
    #[error("no font face matches {0}")]
    NotFound(String),

    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The face data could not be parsed by the rasterizer.
    #[error("failed to parse font {name}: {reason}")]
    Parse { name: String, reason: String },
}

/// Failures raised while reading or validating an [`OverlayStyle`](crate::style::OverlayStyle).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid style json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read style file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid style: {0}")]
    Invalid(String),
}

/// Union of every error the crate returns from its top-level entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
