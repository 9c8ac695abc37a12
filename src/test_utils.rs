//! Deterministic font stand-in for unit tests.

use crate::{
    error::RenderError,
    font_face::{FontMetrics, LineMetrics},
};

/// Every glyph advances by the same width, so expected positions can be
/// computed by hand.
#[derive(Clone, Debug)]
pub struct FixedAdvanceFont {
    pub advance: f32,
    pub space: f32,
    pub line_height: f32,
    missing: Vec<char>,
}

impl FixedAdvanceFont {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            space: advance,
            line_height,
            missing: vec![],
        }
    }

    pub fn with_space(mut self, space: f32) -> Self {
        self.space = space;
        self
    }

    pub fn without_glyph(mut self, ch: char) -> Self {
        self.missing.push(ch);
        self
    }

    fn advance_of(&self, ch: char) -> Result<f32, RenderError> {
        if self.missing.contains(&ch) {
            return Err(RenderError::MissingGlyph { ch });
        }
        Ok(if ch == ' ' { self.space } else { self.advance })
    }
}

impl FontMetrics for FixedAdvanceFont {
    fn measure(&self, text: &str) -> Result<f32, RenderError> {
        text.chars().map(|ch| self.advance_of(ch)).sum()
    }

    fn line_metrics(&self) -> LineMetrics {
        LineMetrics {
            ascent: self.line_height * 0.8,
            descent: -self.line_height * 0.2,
            line_gap: 0.0,
        }
    }

    /// Each visible glyph is a solid box one pixel narrower than its advance.
    fn rasterize(
        &self,
        origin: [f32; 2],
        text: &str,
        sink: &mut dyn FnMut([i64; 2], u8),
    ) -> Result<(), RenderError> {
        let mut pen_x = origin[0];
        for ch in text.chars() {
            let advance = self.advance_of(ch)?;
            if !ch.is_whitespace() {
                let left = pen_x.round() as i64;
                let top = origin[1].round() as i64;
                for row in 0..self.line_height as i64 {
                    for col in 0..(advance as i64 - 1).max(0) {
                        sink([left + col, top + row], 255);
                    }
                }
            }
            pen_x += advance;
        }
        Ok(())
    }
}
