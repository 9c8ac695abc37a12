use std::path::Path;

use crate::{
    error::{Error, RenderError},
    font_face::FontFace,
    font_storage::FontStorage,
    overlay::{ListOverlay, PanelMetrics, items},
    renderer::Canvas,
    style::OverlayStyle,
    text::HighlightFonts,
};

/// High-level entry point for rendering list overlays.
///
/// Loads both faces once from the style's font sources and keeps them for
/// every later render. Rendering only borrows `self`, and each call builds
/// its own canvas, so one system can be shared between threads.
pub struct OverlaySystem {
    style: OverlayStyle,
    highlight_face: FontFace,
    regular_face: FontFace,
}

impl std::fmt::Debug for OverlaySystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlaySystem")
            .field("highlight_face", &self.highlight_face)
            .field("regular_face", &self.regular_face)
            .finish_non_exhaustive()
    }
}

impl OverlaySystem {
    /// Validates `style` and loads its fonts into a fresh storage.
    pub fn new(style: OverlayStyle) -> Result<Self, Error> {
        let mut font_storage = FontStorage::new();
        Self::with_font_storage(style, &mut font_storage)
    }

    /// Like [`Self::new`], resolving fonts through an existing storage.
    pub fn with_font_storage(
        style: OverlayStyle,
        font_storage: &mut FontStorage,
    ) -> Result<Self, Error> {
        style.validate()?;

        for dir in &style.font_dirs {
            font_storage.load_fonts_dir(dir.clone());
        }

        let highlight_face =
            font_storage.load_face(&style.highlight_font, style.highlight_font_size)?;
        let regular_face = font_storage.load_face(&style.regular_font, style.font_size)?;

        log::info!(
            "overlay fonts: highlight {} @ {}px, regular {} @ {}px",
            highlight_face.name(),
            highlight_face.size(),
            regular_face.name(),
            regular_face.size()
        );

        Ok(Self {
            style,
            highlight_face,
            regular_face,
        })
    }

    /// Builds a system from faces loaded elsewhere.
    pub fn from_faces(
        style: OverlayStyle,
        highlight_face: FontFace,
        regular_face: FontFace,
    ) -> Result<Self, Error> {
        style.validate()?;
        Ok(Self {
            style,
            highlight_face,
            regular_face,
        })
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn fonts(&self) -> HighlightFonts<'_> {
        HighlightFonts::new(&self.highlight_face, &self.regular_face)
    }

    pub fn list_overlay(&self) -> ListOverlay<'_> {
        ListOverlay::new(&self.style, self.fonts())
    }
}

/// newline-separated content
impl OverlaySystem {
    /// Measures the overlay for `content` without drawing it.
    pub fn measure_text(&self, content: &str) -> Result<PanelMetrics, RenderError> {
        self.list_overlay().measure(&items(content))
    }

    /// Renders `content`, one list item per non-blank line.
    pub fn render_text(&self, content: &str) -> Result<Canvas, RenderError> {
        let items = items(content);
        if items.is_empty() {
            log::warn!("overlay content has no non-blank lines");
        }
        self.list_overlay().render(&items)
    }

    /// Renders `content` and writes it to `path` as PNG.
    pub fn render_text_to_file(
        &self,
        content: &str,
        path: impl AsRef<Path>,
    ) -> Result<PanelMetrics, RenderError> {
        self.list_overlay().render_to_file(&items(content), path)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ConfigError, font_storage::FontSource};

    fn system() -> Option<OverlaySystem> {
        let style = OverlayStyle {
            canvas_width: 640.0,
            font_size: 24.0,
            highlight_font_size: 24.0,
            ..OverlayStyle::default()
        };
        match OverlaySystem::new(style) {
            Ok(system) => Some(system),
            Err(e) => {
                log::warn!("skipping, no usable system font: {e}");
                None
            }
        }
    }

    #[test]
    fn invalid_style_is_rejected_before_loading_fonts() {
        let style = OverlayStyle {
            canvas_width: 10.0,
            highlight_font: FontSource::File {
                path: "/missing.ttf".into(),
            },
            ..OverlayStyle::default()
        };
        let err = OverlaySystem::new(style).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_font_file_is_a_font_error() {
        let style = OverlayStyle {
            highlight_font: FontSource::File {
                path: "/missing.ttf".into(),
            },
            ..OverlayStyle::default()
        };
        let err = OverlaySystem::new(style).unwrap_err();
        assert!(matches!(err, Error::Font(_)));
    }

    #[test]
    fn render_text_with_system_fonts() {
        let Some(system) = system() else {
            return;
        };

        let content = "Price: 19.99 dollars only\n\nShipping: free over fifty, \
                       arrives within three to five business days";
        let metrics = system.measure_text(content).unwrap();
        assert_eq!(metrics.item_count, 2);
        assert!(metrics.content_height >= 2.0 * system.style().line_height());

        let canvas = system.render_text(content).unwrap();
        assert_eq!(
            [canvas.width(), canvas.height()],
            metrics.canvas_size
        );

        // white and the black panel have equal red and blue, gold does not
        let gold_pixels = canvas
            .image()
            .pixels()
            .filter(|p| p.0[0] as i32 - p.0[2] as i32 > 100)
            .count();
        assert!(gold_pixels > 0);
    }

    #[test]
    fn blank_content_is_an_empty_overlay() {
        let Some(system) = system() else {
            return;
        };
        let err = system.render_text("\n   \n").unwrap_err();
        assert!(matches!(err, RenderError::EmptyOverlay));
    }
}
