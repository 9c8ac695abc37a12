pub mod canvas;

pub use canvas::Canvas;

use crate::{color::Color, error::RenderError, font_face::FontMetrics};

/// Axis-aligned rectangle in canvas pixels, y-axis down.
pub type Rect = euclid::default::Box2D<f32>;

/// Something text and rectangles can be drawn onto.
///
/// The layout engine only talks to this trait, so the same code drives the
/// measuring pass ([`DryRunSurface`]) and the drawing pass ([`Canvas`]).
pub trait Surface {
    /// Draws `text` with its line box's top-left corner at `origin`.
    fn draw_text(
        &mut self,
        font: &dyn FontMetrics,
        origin: [f32; 2],
        text: &str,
        color: Color,
    ) -> Result<(), RenderError>;

    /// Fills `rect`, rounding its corners by `corner_radius` pixels.
    fn fill_rect(&mut self, rect: Rect, corner_radius: f32, color: Color);
}

/// Throwaway surface for the measuring pass.
///
/// Every call is accepted and discarded; only the number of calls is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DryRunSurface {
    pub text_calls: usize,
    pub rect_calls: usize,
}

impl DryRunSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for DryRunSurface {
    fn draw_text(
        &mut self,
        _font: &dyn FontMetrics,
        _origin: [f32; 2],
        _text: &str,
        _color: Color,
    ) -> Result<(), RenderError> {
        self.text_calls += 1;
        Ok(())
    }

    fn fill_rect(&mut self, _rect: Rect, _corner_radius: f32, _color: Color) {
        self.rect_calls += 1;
    }
}

/// A text draw captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub origin: [f32; 2],
    pub text: String,
    pub color: Color,
}

/// Surface that keeps every call it receives, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    pub texts: Vec<DrawCall>,
    pub rects: Vec<(Rect, Color)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct line tops in drawing order.
    pub fn line_tops(&self) -> Vec<f32> {
        let mut tops: Vec<f32> = Vec::new();
        for call in &self.texts {
            if tops.last() != Some(&call.origin[1]) {
                tops.push(call.origin[1]);
            }
        }
        tops
    }
}

impl Surface for RecordingSurface {
    fn draw_text(
        &mut self,
        _font: &dyn FontMetrics,
        origin: [f32; 2],
        text: &str,
        color: Color,
    ) -> Result<(), RenderError> {
        self.texts.push(DrawCall {
            origin,
            text: text.to_string(),
            color,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, _corner_radius: f32, color: Color) {
        self.rects.push((rect, color));
    }
}
