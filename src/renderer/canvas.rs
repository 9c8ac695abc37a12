use std::path::Path;

use image::RgbaImage;

use crate::{
    color::Color,
    error::RenderError,
    font_face::FontMetrics,
    renderer::{Rect, Surface},
};

/// RGBA8 drawing surface, transparent until drawn on.
///
/// Pixels are row-major with the origin at the top-left. Colours are
/// composited source-over with straight alpha, so the saved PNG can be laid
/// over video frames as-is.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        Some(Color::rgba(r, g, b, a))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Writes the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.image
            .save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        Ok(())
    }

    /// Composites `color` over the pixel at (`x`, `y`).
    ///
    /// Out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if color.a == 0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u64, y as u64);
        if x >= self.width() as u64 || y >= self.height() as u64 {
            return;
        }

        let pixel = self.image.get_pixel_mut(x as u32, y as u32);

        let a = color.a as f32 / 255.0;
        let bg_a = pixel[3] as f32 / 255.0;
        let out_a = a + bg_a * (1.0 - a);
        // Avoid division by zero
        if out_a <= 0.0 {
            return;
        }

        let channel = |src: u8, dst: u8| {
            let src = src as f32 / 255.0;
            let dst = dst as f32 / 255.0;
            let out = (src * a + dst * bg_a * (1.0 - a)) / out_a;
            (out.clamp(0.0, 1.0) * 255.0).round() as u8
        };

        *pixel = Color::rgba(
            channel(color.r, pixel[0]),
            channel(color.g, pixel[1]),
            channel(color.b, pixel[2]),
            (out_a.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
        .into();
    }
}

impl Surface for Canvas {
    fn draw_text(
        &mut self,
        font: &dyn FontMetrics,
        origin: [f32; 2],
        text: &str,
        color: Color,
    ) -> Result<(), RenderError> {
        font.rasterize(origin, text, &mut |[x, y], coverage| {
            self.blend_pixel(x, y, color.with_coverage(coverage));
        })
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: f32, color: Color) {
        if rect.is_empty() || color.a == 0 {
            return;
        }

        let radius = corner_radius
            .max(0.0)
            .min(rect.width() / 2.0)
            .min(rect.height() / 2.0);

        let x_start = rect.min.x.floor().max(0.0) as i64;
        let y_start = rect.min.y.floor().max(0.0) as i64;
        let x_end = (rect.max.x.ceil() as i64).min(self.width() as i64);
        let y_end = (rect.max.y.ceil() as i64).min(self.height() as i64);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let coverage = rounded_rect_coverage(&rect, radius, x as f32 + 0.5, y as f32 + 0.5);
                if coverage > 0.0 {
                    let alpha = (coverage * 255.0).round() as u8;
                    self.blend_pixel(x, y, color.with_coverage(alpha));
                }
            }
        }
    }
}

/// Approximate coverage of the pixel centred at (`px`, `py`).
///
/// Straight edges are hard; corners get a one pixel anti-aliased falloff.
fn rounded_rect_coverage(rect: &Rect, radius: f32, px: f32, py: f32) -> f32 {
    if px < rect.min.x || px > rect.max.x || py < rect.min.y || py > rect.max.y {
        return 0.0;
    }
    if radius <= 0.0 {
        return 1.0;
    }

    let cx = px.clamp(rect.min.x + radius, rect.max.x - radius);
    let cy = py.clamp(rect.min.y + radius, rect.max.y - radius);
    let distance = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();

    (radius + 0.5 - distance).clamp(0.0, 1.0)
}
