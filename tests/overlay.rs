#![allow(clippy::unwrap_used)]

mod common;

use common::MonoFont;
use overlay_text::{
    Color, FontSource, FontStorage, ListOverlay, OverlayStyle, OverlaySystem, RenderError,
    overlay::items,
    renderer::{DryRunSurface, RecordingSurface},
    text::{HighlightFonts, LineBox, LineColors, RunStyle, draw_highlighted_line, layout_highlighted_line},
};

const COLORS: LineColors = LineColors {
    highlight: Color::GOLD,
    regular: Color::WHITE,
};

fn small_style() -> OverlayStyle {
    OverlayStyle {
        canvas_width: 400.0,
        panel_margin: 20.0,
        panel_padding: 20.0,
        panel_radius: 8.0,
        font_size: 16.0,
        highlight_font_size: 16.0,
        line_height_scale: 1.25,
        paragraph_spacing: 10.0,
        ..OverlayStyle::default()
    }
}

#[test]
fn price_line_wraps_between_label_and_detail_words() {
    let font = MonoFont::new(10.0, 20.0);
    let fonts = HighlightFonts::new(&font, &font);
    // "Price: 19.99" is 120 wide, adding " dollars" would reach 200
    let line_box = LineBox {
        origin: [0.0, 0.0],
        max_width: 130.0,
        line_height: 20.0,
    };

    let mut surface = RecordingSurface::new();
    let next_y = draw_highlighted_line(
        &mut surface,
        "Price: 19.99 dollars only",
        &line_box,
        &fonts,
        &COLORS,
    )
    .unwrap();

    let drawn: Vec<(&str, [f32; 2], Color)> = surface
        .texts
        .iter()
        .map(|call| (call.text.as_str(), call.origin, call.color))
        .collect();
    assert_eq!(
        drawn,
        vec![
            ("Price:", [0.0, 0.0], Color::GOLD),
            ("19.99", [70.0, 0.0], Color::WHITE),
            ("dollars", [0.0, 20.0], Color::WHITE),
            ("only", [80.0, 20.0], Color::WHITE),
        ]
    );
    assert_eq!(next_y, 40.0);
}

#[test]
fn wrapped_lines_stay_inside_the_box() {
    let bold = MonoFont::new(11.0, 20.0);
    let regular = MonoFont::new(8.0, 20.0);
    let fonts = HighlightFonts::new(&bold, &regular);
    let line_box = LineBox {
        origin: [15.0, 5.0],
        max_width: 150.0,
        line_height: 24.0,
    };

    let layout = layout_highlighted_line(
        "Delivery window: between nine and five on weekdays, by appointment on weekends",
        &line_box,
        &fonts,
    )
    .unwrap();

    assert!(layout.lines.len() > 1);
    for (i, line) in layout.lines.iter().enumerate() {
        assert_eq!(line.top, 5.0 + 24.0 * i as f32);
        assert_eq!(line.runs[0].x, 15.0);
        assert!(line.runs.last().unwrap().right() <= 15.0 + 150.0);
        assert!(line.width() <= 150.0);
    }
    assert_eq!(layout.text_of(RunStyle::Highlight), "Delivery window:");
    assert_eq!(layout.next_y, 5.0 + 24.0 * layout.lines.len() as f32);
}

#[test]
fn measuring_and_drawing_passes_agree() {
    let style = small_style();
    let bold = MonoFont::new(9.0, 16.0);
    let regular = MonoFont::new(7.0, 16.0);
    let overlay = ListOverlay::new(&style, HighlightFonts::new(&bold, &regular));

    let content = "Origin: hand picked in the hills above the old town\n\n\
                   Roast: medium\n   \n\
                   Notes: dark chocolate, dried cherry and a long sweet finish";
    let list = items(content);
    assert_eq!(list.len(), 3);

    let metrics = overlay.measure(&list).unwrap();
    let mut recording = RecordingSurface::new();
    let drawn = overlay.render_onto(&mut recording, &list).unwrap();
    assert_eq!(metrics, drawn);

    let mut dry_run = DryRunSurface::new();
    overlay.render_onto(&mut dry_run, &list).unwrap();
    assert_eq!(dry_run.text_calls, recording.texts.len());
    assert_eq!(dry_run.rect_calls, 1);

    let tops = recording.line_tops();
    let bottom = tops.last().unwrap() + style.line_height();
    assert_eq!(bottom - overlay.text_origin()[1], metrics.content_height);
    assert!(bottom <= metrics.panel.max.y - style.panel_padding);
}

#[test]
fn empty_content_is_reported() {
    let style = small_style();
    let font = MonoFont::new(8.0, 16.0);
    let overlay = ListOverlay::new(&style, HighlightFonts::new(&font, &font));

    let err = overlay.render(&items("\n \n\t")).unwrap_err();
    assert!(matches!(err, RenderError::EmptyOverlay));
}

#[test]
fn rendered_png_matches_measured_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlay.png");
    let style = small_style();
    let font = MonoFont::new(8.0, 16.0);
    let overlay = ListOverlay::new(&style, HighlightFonts::new(&font, &font));

    let metrics = overlay
        .render_to_file(&["Size: 250 g", "Grind: whole bean"], &path)
        .unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (metrics.canvas_size[0], metrics.canvas_size[1]));
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert!(image.pixels().any(|p| p.0 == Color::GOLD.to_array()));
    assert!(image.pixels().any(|p| p.0 == Color::WHITE.to_array()));
}

#[test]
fn overlay_system_from_system_faces() {
    let mut storage = FontStorage::new();
    let (Ok(bold), Ok(regular)) = (
        storage.load_face(&FontSource::sans_serif(true), 18.0),
        storage.load_face(&FontSource::sans_serif(false), 16.0),
    ) else {
        // no system fonts installed
        return;
    };

    let system = OverlaySystem::from_faces(small_style(), bold, regular).unwrap();
    let metrics = system
        .measure_text("Price: 19.99 dollars only\nColour: deep ocean blue")
        .unwrap();
    let canvas = system
        .render_text("Price: 19.99 dollars only\nColour: deep ocean blue")
        .unwrap();

    assert_eq!(metrics.item_count, 2);
    assert_eq!([canvas.width(), canvas.height()], metrics.canvas_size);
}
