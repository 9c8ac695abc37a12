use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::error::{FontError, RenderError};

/// Vertical metrics of a face at its configured pixel size.
///
/// `descent` is negative below the baseline, as reported by `fontdue`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

/// A loaded font at a fixed size that can measure and rasterize strings.
///
/// **Y-axis goes down.** `origin` passed to [`FontMetrics::rasterize`] is the
/// top-left corner of the line box; the baseline sits `ascent` below it.
pub trait FontMetrics {
    /// Returns the advance width of `text` in pixels.
    fn measure(&self, text: &str) -> Result<f32, RenderError>;

    fn line_metrics(&self) -> LineMetrics;

    /// Rasterizes `text` and reports every covered pixel to `sink`.
    ///
    /// Coordinates may fall outside any target image; clipping is up to the
    /// caller.
    fn rasterize(
        &self,
        origin: [f32; 2],
        text: &str,
        sink: &mut dyn FnMut([i64; 2], u8),
    ) -> Result<(), RenderError>;

    /// Width of the single space used as the gap between words.
    fn space_width(&self) -> Result<f32, RenderError> {
        self.measure(" ")
    }
}

/// Rasterized coverage of one glyph, kept by [`FontFace`].
struct RasterGlyph {
    metrics: fontdue::Metrics,
    coverage: Vec<u8>,
}

/// [`FontMetrics`] backed by a `fontdue` font at one pixel size.
///
/// Glyph bitmaps are cached per face, so a face can be shared between
/// threads and reused across many overlays.
pub struct FontFace {
    name: String,
    font: Arc<fontdue::Font>,
    size: f32,
    line_metrics: LineMetrics,
    raster_cache: Mutex<HashMap<u16, Arc<RasterGlyph>, fxhash::FxBuildHasher>>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("line_metrics", &self.line_metrics)
            .finish_non_exhaustive()
    }
}

impl FontFace {
    /// Wraps an already parsed font.
    pub fn new(name: impl Into<String>, font: Arc<fontdue::Font>, size: f32) -> Self {
        let line_metrics = font
            .horizontal_line_metrics(size)
            .map(|m| LineMetrics {
                ascent: m.ascent,
                descent: m.descent,
                line_gap: m.line_gap,
            })
            .unwrap_or(LineMetrics {
                // fonts without a hhea table still get a usable box
                ascent: size * 0.8,
                descent: -size * 0.2,
                line_gap: 0.0,
            });

        Self {
            name: name.into(),
            font,
            size,
            line_metrics,
            raster_cache: Mutex::new(HashMap::with_hasher(fxhash::FxBuildHasher::default())),
        }
    }

    /// Parses a TrueType/OpenType font from memory.
    pub fn from_bytes(
        name: impl Into<String>,
        data: &[u8],
        collection_index: u32,
        size: f32,
    ) -> Result<Self, FontError> {
        let name = name.into();
        let font = fontdue::Font::from_bytes(
            data,
            fontdue::FontSettings {
                collection_index,
                scale: 40.0,
                load_substitutions: true,
            },
        )
        .map_err(|reason| FontError::Parse {
            name: name.clone(),
            reason: reason.to_string(),
        })?;

        Ok(Self::new(name, Arc::new(font), size))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns a face sharing the same font data at another size.
    pub fn with_size(&self, size: f32) -> Self {
        Self::new(self.name.clone(), Arc::clone(&self.font), size)
    }

    /// Number of glyph bitmaps currently cached.
    pub fn cached_glyphs(&self) -> usize {
        self.raster_cache.lock().len()
    }

    fn glyph_index(&self, ch: char) -> Result<u16, RenderError> {
        let index = self.font.lookup_glyph_index(ch);
        if index == 0 && !ch.is_whitespace() && !ch.is_control() {
            return Err(RenderError::MissingGlyph { ch });
        }
        Ok(index)
    }

    fn kerning(&self, prev: Option<u16>, next: u16) -> f32 {
        prev.and_then(|prev| self.font.horizontal_kern_indexed(prev, next, self.size))
            .unwrap_or(0.0)
    }

    fn raster(&self, glyph_index: u16) -> Arc<RasterGlyph> {
        let mut cache = self.raster_cache.lock();
        let glyph = cache.entry(glyph_index).or_insert_with(|| {
            let (metrics, coverage) = self.font.rasterize_indexed(glyph_index, self.size);
            Arc::new(RasterGlyph { metrics, coverage })
        });
        Arc::clone(glyph)
    }
}

impl FontMetrics for FontFace {
    fn measure(&self, text: &str) -> Result<f32, RenderError> {
        let mut width = 0.0;
        let mut prev = None;

        for ch in text.chars() {
            let index = self.glyph_index(ch)?;
            width += self.kerning(prev, index);
            width += self.font.metrics_indexed(index, self.size).advance_width;
            prev = Some(index);
        }

        Ok(width)
    }

    fn line_metrics(&self) -> LineMetrics {
        self.line_metrics
    }

    fn rasterize(
        &self,
        origin: [f32; 2],
        text: &str,
        sink: &mut dyn FnMut([i64; 2], u8),
    ) -> Result<(), RenderError> {
        let baseline = origin[1] + self.line_metrics.ascent;
        let mut pen_x = origin[0];
        let mut prev = None;

        for ch in text.chars() {
            let index = self.glyph_index(ch)?;
            pen_x += self.kerning(prev, index);
            prev = Some(index);

            let glyph = self.raster(index);
            let metrics = &glyph.metrics;

            if metrics.width > 0 && metrics.height > 0 {
                // glyph bitmaps are stored top row first, relative to the baseline
                let left = (pen_x + metrics.xmin as f32).round() as i64;
                let top = (baseline - (metrics.ymin as f32 + metrics.height as f32)).round() as i64;

                for row in 0..metrics.height {
                    for col in 0..metrics.width {
                        let coverage = glyph.coverage[row * metrics.width + col];
                        if coverage == 0 {
                            continue;
                        }
                        sink([left + col as i64, top + row as i64], coverage);
                    }
                }
            }

            pen_x += metrics.advance_width;
        }

        Ok(())
    }
}
