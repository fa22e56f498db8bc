//! Placement of the six draft regions on the canvas.

use shared::{
    domain::{Settings, TieupLocation},
    error::DraftError,
};

/// Side length of one grid cell, in pixels.
pub const CELL_SIZE: u32 = 20;
/// Gap between the color strips and the grids they label.
pub const REGION_GAP: u32 = 10;

const MIN_CANVAS_WIDTH: u32 = 800;
const MIN_CANVAS_HEIGHT: u32 = 600;
const CANVAS_MARGIN_X: u32 = 200;
const CANVAS_MARGIN_Y: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Warp,
    Shaft,
    Tieup,
    Chart,
    Treadle,
    Weft,
}

impl Region {
    /// Hit-test order.
    pub const ALL: [Region; 6] = [
        Region::Warp,
        Region::Shaft,
        Region::Tieup,
        Region::Chart,
        Region::Treadle,
        Region::Weft,
    ];

    /// `(rows, cols)` of the region's matrix.
    pub fn extent(self, settings: &Settings) -> (usize, usize) {
        match self {
            Region::Warp => (1, settings.chart_width),
            Region::Shaft => (settings.shaft_count, settings.chart_width),
            Region::Tieup => (settings.shaft_count, settings.treadle_count),
            Region::Chart => (settings.chart_height, settings.chart_width),
            Region::Treadle => (settings.chart_height, settings.treadle_count),
            Region::Weft => (settings.chart_height, 1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Warp => "warp",
            Region::Shaft => "shaft",
            Region::Tieup => "tieup",
            Region::Chart => "chart",
            Region::Treadle => "treadle",
            Region::Weft => "weft",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin {
    pub x: u32,
    pub y: u32,
}

impl Origin {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Top-left pixel position of every region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionOrigins {
    pub warp: Origin,
    pub shaft: Origin,
    pub tieup: Origin,
    pub chart: Origin,
    pub treadle: Origin,
    pub weft: Origin,
}

impl RegionOrigins {
    pub fn get(&self, region: Region) -> Origin {
        match region {
            Region::Warp => self.warp,
            Region::Shaft => self.shaft,
            Region::Tieup => self.tieup,
            Region::Chart => self.chart,
            Region::Treadle => self.treadle,
            Region::Weft => self.weft,
        }
    }
}

/// Pixel rectangle covered by one region. Containment is half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRect {
    pub region: Region,
    pub origin: Origin,
    pub rows: usize,
    pub cols: usize,
}

impl RegionRect {
    pub fn width(&self) -> u32 {
        self.cols as u32 * CELL_SIZE
    }

    pub fn height(&self) -> u32 {
        self.rows as u32 * CELL_SIZE
    }

    pub fn right(&self) -> u32 {
        self.origin.x + self.width()
    }

    pub fn bottom(&self) -> u32 {
        self.origin.y + self.height()
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.origin.x as f32
            && x < self.right() as f32
            && y >= self.origin.y as f32
            && y < self.bottom() as f32
    }

    pub fn intersects(&self, other: &RegionRect) -> bool {
        self.origin.x < other.right()
            && other.origin.x < self.right()
            && self.origin.y < other.bottom()
            && other.origin.y < self.bottom()
    }

    /// `(row, col)` of the cell under a point inside this rectangle.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !self.contains(x, y) {
            return None;
        }
        let col = ((x - self.origin.x as f32) / CELL_SIZE as f32).floor() as usize;
        let row = ((y - self.origin.y as f32) / CELL_SIZE as f32).floor() as usize;
        Some((row.min(self.rows - 1), col.min(self.cols - 1)))
    }

    /// Pixel origin of a cell inside this rectangle.
    pub fn cell_origin(&self, row: usize, col: usize) -> Origin {
        Origin::new(
            self.origin.x + col as u32 * CELL_SIZE,
            self.origin.y + row as u32 * CELL_SIZE,
        )
    }
}

/// Origins plus extents for one settings snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub origins: RegionOrigins,
    rects: [RegionRect; 6],
}

impl Layout {
    pub fn new(settings: &Settings) -> Result<Self, DraftError> {
        let origins = compute_region_origins(settings)?;
        let rects = Region::ALL.map(|region| {
            let (rows, cols) = region.extent(settings);
            RegionRect {
                region,
                origin: origins.get(region),
                rows,
                cols,
            }
        });
        Ok(Self { origins, rects })
    }

    /// Rectangles in hit-test order.
    pub fn rects(&self) -> &[RegionRect; 6] {
        &self.rects
    }

    pub fn rect(&self, region: Region) -> &RegionRect {
        // Declaration order of `Region` matches `Region::ALL`.
        &self.rects[region as usize]
    }
}

/// Computes where each region starts for the configured tie-up location.
///
/// Only `right-up` has a defined arrangement; the other locations yield
/// [`DraftError::UnsupportedTieupLocation`].
pub fn compute_region_origins(settings: &Settings) -> Result<RegionOrigins, DraftError> {
    let cell = CELL_SIZE;
    let width = settings.chart_width as u32 * cell;
    let shafts = settings.shaft_count as u32 * cell;
    let treadles = settings.treadle_count as u32 * cell;

    match settings.tieup_location {
        TieupLocation::RightUp => {
            let threading_y = cell + REGION_GAP;
            let chart_y = cell + shafts + cell + REGION_GAP;
            let right_x = width + cell;
            Ok(RegionOrigins {
                warp: Origin::new(0, 0),
                shaft: Origin::new(0, threading_y),
                tieup: Origin::new(right_x, threading_y),
                chart: Origin::new(0, chart_y),
                treadle: Origin::new(right_x, chart_y),
                weft: Origin::new(right_x + treadles + REGION_GAP, chart_y),
            })
        }
        other => {
            tracing::warn!(location = %other, "tie-up location has no layout");
            Err(DraftError::UnsupportedTieupLocation(other))
        }
    }
}

/// Canvas pixel size needed to show every region with some margin.
pub fn canvas_size(settings: &Settings) -> (u32, u32) {
    let cell = CELL_SIZE;
    let width = settings.chart_width as u32 * cell
        + settings.treadle_count as u32 * cell
        + CANVAS_MARGIN_X
        + REGION_GAP;
    let height = settings.chart_height as u32 * cell
        + settings.shaft_count as u32 * cell
        + CANVAS_MARGIN_Y
        + REGION_GAP;
    (width.max(MIN_CANVAS_WIDTH), height.max(MIN_CANVAS_HEIGHT))
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
