use crate::{
    color::Color,
    error::RenderError,
    font_face::FontMetrics,
    renderer::Surface,
    text::data::{LineLayout, RunStyle, TextLine, TextRun},
};

/// Character separating the highlighted label from the regular detail.
pub const HIGHLIGHT_DELIMITER: char = ':';

/// Splits `text` on the first [`HIGHLIGHT_DELIMITER`].
///
/// The label keeps the delimiter; later delimiters stay in the detail.
///
/// ```
/// use overlay_text::text::split_highlight;
///
/// assert_eq!(split_highlight("A: B: C"), (Some("A:"), " B: C"));
/// assert_eq!(split_highlight("no label"), (None, "no label"));
/// ```
pub fn split_highlight(text: &str) -> (Option<&str>, &str) {
    match text.find(HIGHLIGHT_DELIMITER) {
        Some(index) => {
            let split = index + HIGHLIGHT_DELIMITER.len_utf8();
            (Some(&text[..split]), &text[split..])
        }
        None => (None, text),
    }
}

/// The two fonts a highlighted line is drawn with.
///
/// The measuring pass and the drawing pass borrow the same value, so they
/// cannot disagree about which fonts were used.
#[derive(Clone, Copy)]
pub struct HighlightFonts<'a> {
    pub highlight: &'a dyn FontMetrics,
    pub regular: &'a dyn FontMetrics,
}

impl<'a> HighlightFonts<'a> {
    pub fn new(highlight: &'a dyn FontMetrics, regular: &'a dyn FontMetrics) -> Self {
        Self { highlight, regular }
    }

    pub fn font(&self, style: RunStyle) -> &'a dyn FontMetrics {
        match style {
            RunStyle::Highlight => self.highlight,
            RunStyle::Regular => self.regular,
        }
    }
}

/// Colours for the two run styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineColors {
    pub highlight: Color,
    pub regular: Color,
}

impl LineColors {
    pub fn color(&self, style: RunStyle) -> Color {
        match style {
            RunStyle::Highlight => self.highlight,
            RunStyle::Regular => self.regular,
        }
    }
}

/// Geometry of one logical item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineBox {
    /// Left margin of every wrapped line and top of the first one.
    pub origin: [f32; 2],
    pub max_width: f32,
    /// Vertical advance per wrapped line.
    pub line_height: f32,
}

/// Lays out one logical item with greedy word packing.
///
/// Label words come first, then detail words, all on one running cursor.
/// Every word except the first on an output line is preceded by one space of
/// the incoming word's font; that same gap bridges the label and the detail.
/// A word moves to a new line when the line already holds something and the
/// word would cross `origin.x + max_width`. The first word of a line never
/// moves, so a word wider than `max_width` overflows on a line of its own.
///
/// `next_y` is one `line_height` below the last line's top, which is at
/// least `origin.y + line_height` even for text without words.
pub fn layout_highlighted_line(
    text: &str,
    line_box: &LineBox,
    fonts: &HighlightFonts<'_>,
) -> Result<LineLayout, RenderError> {
    let (label, detail) = split_highlight(text);

    let words = label
        .into_iter()
        .flat_map(|label| label.split_whitespace().map(|word| (word, RunStyle::Highlight)))
        .chain(detail.split_whitespace().map(|word| (word, RunStyle::Regular)));

    let [left, top] = line_box.origin;
    let right = left + line_box.max_width;

    let mut lines = Vec::new();
    let mut line = TextLine::new(top);
    let mut cursor_x = left;

    for (word, style) in words {
        let font = fonts.font(style);
        let width = font.measure(word)?;

        let mut gap = if line.is_empty() {
            0.0
        } else {
            font.space_width()?
        };

        if !line.is_empty() && cursor_x + gap + width > right {
            let next_top = line.top + line_box.line_height;
            lines.push(std::mem::replace(&mut line, TextLine::new(next_top)));
            cursor_x = left;
            gap = 0.0;
        }

        let x = cursor_x + gap;
        line.runs.push(TextRun {
            content: word.to_string(),
            style,
            width,
            x,
            y: line.top,
        });
        cursor_x = x + width;
    }

    let last_top = line.top;
    if !line.is_empty() {
        lines.push(line);
    }

    Ok(LineLayout {
        lines,
        next_y: last_top + line_box.line_height,
    })
}

/// Lays out `text` and draws each run onto `surface` in its style's colour.
///
/// Returns the y where the next logical item should begin. Errors from the
/// fonts or the surface are returned as-is.
pub fn draw_highlighted_line<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    line_box: &LineBox,
    fonts: &HighlightFonts<'_>,
    colors: &LineColors,
) -> Result<f32, RenderError> {
    let layout = layout_highlighted_line(text, line_box, fonts)?;

    for run in layout.runs() {
        surface.draw_text(
            fonts.font(run.style),
            [run.x, run.y],
            &run.content,
            colors.color(run.style),
        )?;
    }

    Ok(layout.next_y)
}
