/// Which of the two fonts and colours a run is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunStyle {
    /// The label before the first `:`, delimiter included.
    Highlight,
    /// Everything after the first `:`, or the whole text without one.
    Regular,
}

/// One word placed on a line in a single style.
///
/// **Y-axis goes down.** `x`/`y` are the top-left of the run's line box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub content: String,
    pub style: RunStyle,
    /// Advance width reported by the run's font.
    pub width: f32,
    pub x: f32,
    pub y: f32,
}

impl TextRun {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// A row of runs produced by the greedy packer.
///
/// Runs are ordered left to right; the gaps between them are implied by
/// their positions.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub top: f32,
    pub runs: Vec<TextRun>,
}

impl TextLine {
    pub fn new(top: f32) -> Self {
        Self { top, runs: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Horizontal extent from the first run's left edge to the last run's
    /// right edge, gaps included.
    pub fn width(&self) -> f32 {
        match (self.runs.first(), self.runs.last()) {
            (Some(first), Some(last)) => last.right() - first.x,
            _ => 0.0,
        }
    }
}

/// Result of laying out one logical item.
#[derive(Clone, Debug, PartialEq)]
pub struct LineLayout {
    pub lines: Vec<TextLine>,
    /// Where the next logical item should start.
    pub next_y: f32,
}

impl LineLayout {
    /// Iterates over every run in drawing order.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.lines.iter().flat_map(|line| line.runs.iter())
    }

    /// Words of the given style joined by single spaces.
    pub fn text_of(&self, style: RunStyle) -> String {
        self.runs()
            .filter(|run| run.style == style)
            .map(|run| run.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
