//! # overlay-text
//!
//! Two-tone list overlays for video frames, rendered on the CPU.
//!
//! ## Overview
//!
//! Each list item is a single string such as `"Price: 19.99 dollars"`. The part up to and
//! including the first `:` is the *highlight* and is drawn in its own font and colour; the
//! rest is the *detail*. Words are wrapped greedily into a fixed-width box, and the label
//! and detail can share a line.
//!
//! The same layout code serves two purposes. A dry run on a [`renderer::DryRunSurface`]
//! measures the content so the background panel can be sized. The real pass then draws
//! onto a [`renderer::Canvas`], which can be saved as a transparent PNG.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use overlay_text::{OverlayStyle, OverlaySystem};
//!
//! let style = OverlayStyle::from_json_file("style.json")?;
//! let system = OverlaySystem::new(style)?;
//!
//! let metrics = system.render_text_to_file(
//!     "Price: 19.99 dollars\nShipping: free over fifty",
//!     "overlay.png",
//! )?;
//! println!("canvas {:?}", metrics.canvas_size);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! *   **Highlighted wrapping**: label and detail share lines, each in its own font.
//! *   **Two-pass sizing**: the panel is measured with the exact code that draws it.
//! *   **Font Management**: system fonts and font files through `fontdb`.
//! *   **Thread Safety**: an [`OverlaySystem`] only needs `&self` to render.

pub mod color;
pub mod error;
pub mod font_face;
pub mod font_storage;
pub mod overlay;
pub mod overlay_system;
pub mod renderer;
pub mod style;
pub mod text;

#[cfg(test)]
mod test_utils;

// common re-exports
pub use color::Color;
pub use error::{ConfigError, Error, FontError, RenderError};
pub use font_face::{FontFace, FontMetrics, LineMetrics};
pub use font_storage::{FontSource, FontStorage};
pub use overlay::{ListOverlay, PanelMetrics};
pub use overlay_system::OverlaySystem;
pub use style::OverlayStyle;

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use image;
