use super::*;
use shared::domain::TieupLocation;

use crate::hit_test::{apply_hit, CellHit};

fn small_settings() -> Settings {
    Settings {
        chart_width: 2,
        chart_height: 2,
        shaft_count: 2,
        treadle_count: 2,
        ..Settings::default()
    }
}

#[derive(Default)]
struct RecordingSurface {
    fills: Vec<(PixelRect, Color)>,
    strokes: usize,
    labels: Vec<String>,
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, _color: Color) {}

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.fills.push((rect, color));
    }

    fn stroke_rect(&mut self, _rect: PixelRect, _color: Color) {
        self.strokes += 1;
    }

    fn label(&mut self, _x: u32, _y: u32, text: &str) {
        self.labels.push(text.to_string());
    }
}

#[test]
fn raster_shows_set_cells_in_black_with_grid_lines() {
    let settings = small_settings();
    let state = apply_hit(
        &WeaveState::new(&settings),
        CellHit {
            region: Region::Shaft,
            row: 0,
            col: 0,
        },
        settings.selected_color,
    );

    let mut surface = RasterSurface::for_settings(&settings);
    render(&settings, &state, &mut surface).expect("render");

    // Shaft cell (0,0) spans x 0..20, y 30..50.
    assert_eq!(surface.pixel(10, 40), Some(Color::BLACK));
    assert_eq!(surface.pixel(0, 30), Some(Color::GRID_LINE));
    // Shaft cell (0,1) is empty.
    assert_eq!(surface.pixel(30, 40), Some(Color::WHITE));
    assert_eq!(surface.pixel(700, 500), Some(Color::WHITE));
}

#[test]
fn colored_chart_cells_are_filled_with_their_color() {
    let settings = small_settings();
    let red = Color::rgb(0xff, 0, 0);
    let mut state = WeaveState::new(&settings);
    state.chart = Chart::Colored {
        colors: vec![
            CellColor::Set(red),
            CellColor::Unset,
            CellColor::Set(Color::WHITE),
            CellColor::Set(Color::BLACK),
        ],
        drawdown: state.chart.drawdown().clone(),
    };

    let mut surface = RasterSurface::for_settings(&settings);
    render(&settings, &state, &mut surface).expect("render");

    // Chart origin is (0, 90).
    assert_eq!(surface.pixel(10, 100), Some(red));
    assert_eq!(surface.pixel(30, 120), Some(Color::BLACK));
}

#[test]
fn every_cell_is_outlined_and_labels_are_drawn() {
    let settings = small_settings();
    let state = WeaveState::new(&settings);
    let mut surface = RecordingSurface::default();

    render(&settings, &state, &mut surface).expect("render");

    // warp 2 + shaft 4 + tieup 4 + chart 4 + treadle 4 + weft 2
    assert_eq!(surface.strokes, 20);
    assert!(surface.fills.is_empty());
    assert_eq!(surface.labels, vec!["Warp color", "Weft color"]);
}

#[test]
fn rendering_is_repeatable() {
    let settings = small_settings();
    let state = WeaveState::new(&settings);

    let mut first = RasterSurface::for_settings(&settings);
    let mut second = RasterSurface::for_settings(&settings);
    render(&settings, &state, &mut first).expect("render");
    render(&settings, &state, &mut second).expect("render");
    assert_eq!(first.image().as_raw(), second.image().as_raw());
}

#[test]
fn unsupported_layout_is_not_rendered() {
    let settings = Settings {
        tieup_location: TieupLocation::LeftDown,
        ..small_settings()
    };
    let state = WeaveState::new(&settings);
    let mut surface = RecordingSurface::default();

    assert!(render(&settings, &state, &mut surface).is_err());
    assert_eq!(surface.strokes, 0);
}

#[test]
fn png_encoding_produces_png_signature() {
    let settings = small_settings();
    let mut surface = RasterSurface::for_settings(&settings);
    render(&settings, &WeaveState::new(&settings), &mut surface).expect("render");

    let png = surface.encode_png().expect("png");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
