use std::path::Path;

use crate::{
    error::RenderError,
    renderer::{Canvas, DryRunSurface, Rect, Surface},
    style::{MAX_CANVAS_SIZE, OverlayStyle},
    text::{HighlightFonts, LineBox, draw_highlighted_line},
};

/// Splits overlay content into list items, one per non-blank line.
///
/// Items are trimmed; blank lines never reach the layout engine.
pub fn items(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Size of a list overlay, computed by the measuring pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelMetrics {
    /// Number of items that were laid out.
    pub item_count: usize,
    /// From the first line's top to the last item's `next_y`.
    pub content_height: f32,
    /// Background panel in canvas pixels.
    pub panel: Rect,
    /// `[width, height]` of the output image.
    pub canvas_size: [u32; 2],
}

/// A panel of highlighted list items, sized before it is drawn.
///
/// Rendering runs the same item loop twice: once on a [`DryRunSurface`] to
/// find the content height, then on the real surface once the panel behind
/// the text has been filled. Both runs read the same style and fonts from
/// this value, so the panel always fits what is drawn on it.
pub struct ListOverlay<'a> {
    style: &'a OverlayStyle,
    fonts: HighlightFonts<'a>,
}

impl<'a> ListOverlay<'a> {
    pub fn new(style: &'a OverlayStyle, fonts: HighlightFonts<'a>) -> Self {
        Self { style, fonts }
    }

    pub fn style(&self) -> &OverlayStyle {
        self.style
    }

    /// Top-left corner of the first text line.
    pub fn text_origin(&self) -> [f32; 2] {
        let inset = self.style.panel_margin + self.style.panel_padding;
        [inset, inset]
    }

    fn line_box(&self, top: f32) -> LineBox {
        LineBox {
            origin: [self.text_origin()[0], top],
            max_width: self.style.text_max_width(),
            line_height: self.style.line_height(),
        }
    }

    /// Draws every non-blank item, threading the y cursor between them.
    ///
    /// Returns the content height.
    fn run_pass<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        items: &[&str],
    ) -> Result<f32, RenderError> {
        let top = self.text_origin()[1];
        let colors = self.style.line_colors();
        let mut next_y: Option<f32> = None;

        for item in items.iter().filter(|item| !item.trim().is_empty()) {
            let y = match next_y {
                Some(y) => y + self.style.paragraph_spacing,
                None => top,
            };
            next_y = Some(draw_highlighted_line(
                &mut *surface,
                item,
                &self.line_box(y),
                &self.fonts,
                &colors,
            )?);
        }

        next_y
            .map(|bottom| bottom - top)
            .ok_or(RenderError::EmptyOverlay)
    }

    /// Measuring pass: computes the panel and canvas size without drawing.
    pub fn measure(&self, items: &[&str]) -> Result<PanelMetrics, RenderError> {
        let mut dry_run = DryRunSurface::new();
        let content_height = self.run_pass(&mut dry_run, items)?;

        let margin = self.style.panel_margin;
        let panel = Rect::new(
            euclid::point2(margin, margin),
            euclid::point2(
                self.style.canvas_width - margin,
                margin + 2.0 * self.style.panel_padding + content_height,
            ),
        );
        let width = self.style.canvas_width.ceil();
        let height = (panel.max.y + margin).ceil();
        let limit = MAX_CANVAS_SIZE as f32;
        if !(width.is_finite() && height.is_finite() && width <= limit && height <= limit) {
            return Err(RenderError::CanvasTooLarge {
                width,
                height,
                max: MAX_CANVAS_SIZE,
            });
        }
        let canvas_size = [width as u32, height as u32];

        log::debug!(
            "measured overlay: {} runs, content height {content_height}, canvas {canvas_size:?}",
            dry_run.text_calls
        );

        Ok(PanelMetrics {
            item_count: items.iter().filter(|item| !item.trim().is_empty()).count(),
            content_height,
            panel,
            canvas_size,
        })
    }

    /// Fills the panel and draws the items onto `surface`.
    pub fn render_onto<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        items: &[&str],
    ) -> Result<PanelMetrics, RenderError> {
        let metrics = self.measure(items)?;
        self.draw(surface, &metrics, items)?;
        Ok(metrics)
    }

    /// Renders the overlay onto a new transparent canvas.
    pub fn render(&self, items: &[&str]) -> Result<Canvas, RenderError> {
        let metrics = self.measure(items)?;
        self.render_canvas(&metrics, items)
    }

    /// Renders the overlay and writes it as a PNG file.
    pub fn render_to_file(
        &self,
        items: &[&str],
        path: impl AsRef<Path>,
    ) -> Result<PanelMetrics, RenderError> {
        let metrics = self.measure(items)?;
        let canvas = self.render_canvas(&metrics, items)?;
        canvas.save_png(path.as_ref())?;
        log::debug!("wrote overlay to {}", path.as_ref().display());
        Ok(metrics)
    }

    fn render_canvas(&self, metrics: &PanelMetrics, items: &[&str]) -> Result<Canvas, RenderError> {
        let [width, height] = metrics.canvas_size;
        let mut canvas = Canvas::new(width, height);
        self.draw(&mut canvas, metrics, items)?;
        Ok(canvas)
    }

    fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        metrics: &PanelMetrics,
        items: &[&str],
    ) -> Result<(), RenderError> {
        surface.fill_rect(
            metrics.panel,
            self.style.panel_radius,
            self.style.panel_color,
        );

        let drawn_height = self.run_pass(&mut *surface, items)?;
        if drawn_height != metrics.content_height {
            log::warn!(
                "drawn height {drawn_height} differs from measured {}",
                metrics.content_height
            );
        }
        debug_assert_eq!(drawn_height, metrics.content_height);

        Ok(())
    }
}
