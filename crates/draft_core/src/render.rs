//! Painting the draft onto a drawing surface.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use shared::{
    domain::{CellColor, Color, Settings},
    error::DraftError,
};

use crate::{
    grid::{Chart, WeaveState},
    layout::{canvas_size, Layout, Region, RegionRect, CELL_SIZE},
};

const WARP_LABEL: &str = "Warp color";
const WEFT_LABEL: &str = "Weft color";
const LABEL_OFFSET: (u32, u32) = (8, 10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Target of [`render`]. Implemented by the PNG raster and by GUI painters.
pub trait DrawSurface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: PixelRect, color: Color);
    /// One-pixel outline along the inside of `rect`.
    fn stroke_rect(&mut self, rect: PixelRect, color: Color);
    /// Draws a left-aligned, vertically centred label. Surfaces without
    /// text support skip it.
    fn label(&mut self, _x: u32, _y: u32, _text: &str) {}
}

/// Paints every region of `state` in full.
pub fn render(
    settings: &Settings,
    state: &WeaveState,
    surface: &mut dyn DrawSurface,
) -> Result<(), DraftError> {
    let layout = Layout::new(settings)?;
    surface.clear(Color::WHITE);

    for rect in layout.rects() {
        paint_region(rect, state, surface);
    }

    let warp = layout.origins.warp;
    let weft = layout.origins.weft;
    surface.label(warp.x + LABEL_OFFSET.0, warp.y + LABEL_OFFSET.1, WARP_LABEL);
    surface.label(weft.x + LABEL_OFFSET.0, weft.y + LABEL_OFFSET.1, WEFT_LABEL);
    Ok(())
}

fn paint_region(rect: &RegionRect, state: &WeaveState, surface: &mut dyn DrawSurface) {
    for row in 0..rect.rows {
        for col in 0..rect.cols {
            let origin = rect.cell_origin(row, col);
            let cell = PixelRect {
                x: origin.x,
                y: origin.y,
                width: CELL_SIZE,
                height: CELL_SIZE,
            };
            if let Some(color) = cell_fill(rect.region, state, row, col) {
                surface.fill_rect(cell, color);
            }
            surface.stroke_rect(cell, Color::GRID_LINE);
        }
    }
}

fn cell_fill(region: Region, state: &WeaveState, row: usize, col: usize) -> Option<Color> {
    let flag = |value: bool| value.then_some(Color::BLACK);
    match region {
        Region::Warp => state.warp_colors.get(col).color(),
        Region::Weft => state.weft_colors.get(row).color(),
        Region::Shaft => flag(state.shaft.get(row, col)),
        Region::Tieup => flag(state.tieup.get(row, col)),
        Region::Treadle => flag(state.treadle.get(row, col)),
        Region::Chart => match &state.chart {
            Chart::Drawdown(grid) => flag(grid.get(row, col)),
            Chart::Colored { colors, drawdown } => drawdown
                .index(row, col)
                .and_then(|idx| colors.get(idx))
                .copied()
                .and_then(CellColor::color),
        },
    }
}

/// In-memory RGBA raster.
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// A raster sized to [`canvas_size`] for `settings`.
    pub fn for_settings(settings: &Settings) -> Self {
        let (width, height) = canvas_size(settings);
        Self::new(width, height)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Color::rgb(p.0[0], p.0[1], p.0[2]))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, DraftError> {
        let mut out = Cursor::new(Vec::new());
        self.image
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|err| DraftError::Io(std::io::Error::other(err)))?;
        Ok(out.into_inner())
    }

    fn put(&mut self, x: u32, y: u32, color: Color) {
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, to_rgba(color));
        }
    }
}

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 0xff])
}

impl DrawSurface for RasterSurface {
    fn clear(&mut self, color: Color) {
        let px = to_rgba(color);
        for pixel in self.image.pixels_mut() {
            *pixel = px;
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.put(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Color) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;
        for x in rect.x..=right {
            self.put(x, rect.y, color);
            self.put(x, bottom, color);
        }
        for y in rect.y..=bottom {
            self.put(rect.x, y, color);
            self.put(right, y, color);
        }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
