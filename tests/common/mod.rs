use overlay_text::{FontMetrics, LineMetrics, RenderError};

/// Monospace stand-in: every character advances by `advance` pixels.
pub struct MonoFont {
    pub advance: f32,
    pub line_height: f32,
}

impl MonoFont {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl FontMetrics for MonoFont {
    fn measure(&self, text: &str) -> Result<f32, RenderError> {
        Ok(text.chars().count() as f32 * self.advance)
    }

    fn line_metrics(&self) -> LineMetrics {
        LineMetrics {
            ascent: self.line_height,
            descent: 0.0,
            line_gap: 0.0,
        }
    }

    fn rasterize(
        &self,
        origin: [f32; 2],
        text: &str,
        sink: &mut dyn FnMut([i64; 2], u8),
    ) -> Result<(), RenderError> {
        let top = origin[1] as i64;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = (origin[0] + i as f32 * self.advance) as i64;
            for row in 0..self.line_height as i64 {
                for col in 0..self.advance as i64 - 1 {
                    sink([left + col, top + row], 255);
                }
            }
        }
        Ok(())
    }
}
