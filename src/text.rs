/// Runs, lines and per-item layout results.
pub mod data;
/// The highlighted-line wrapper.
pub mod layout;

pub use data::{LineLayout, RunStyle, TextLine, TextRun};
pub use layout::{
    HighlightFonts, LineBox, LineColors, draw_highlighted_line, layout_highlighted_line,
    split_highlight,
};
