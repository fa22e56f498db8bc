//! Grid model: the six matrices of a weaving draft.
//!
//! Every matrix is stored row-major and indexed as `row * cols + col`, where
//! `cols` is the column count of *that* matrix. Writes outside a matrix are
//! ignored.

use shared::domain::{CellColor, Color, Settings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl BoolGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Wraps `cells` if its length matches `rows * cols`.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Option<Self> {
        (cells.len() == rows * cols).then_some(Self { rows, cols, cells })
    }

    /// Builds a grid from nested rows; all rows must share one length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.iter().any(|row| row.as_ref().len() != cols) {
            return None;
        }
        let cells = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|idx| self.cells[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if let Some(idx) = self.index(row, col) {
            self.cells[idx] = value;
        }
    }

    /// Flips one cell. Returns false when the cell lies outside the grid.
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = !self.cells[idx];
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> &[bool] {
        if row >= self.rows {
            return &[];
        }
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.rows).map(move |row| self.get(row, col))
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows).map(|row| self.row(row).to_vec()).collect()
    }

    pub fn is_all_false(&self) -> bool {
        self.cells.iter().all(|cell| !cell)
    }
}

/// A one-dimensional run of color cells (warp or weft colors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorStrip {
    cells: Vec<CellColor>,
}

impl ColorStrip {
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![CellColor::Unset; len],
        }
    }

    pub fn from_cells(cells: Vec<CellColor>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CellColor] {
        &self.cells
    }

    pub fn get(&self, idx: usize) -> CellColor {
        self.cells.get(idx).copied().unwrap_or_default()
    }

    pub fn set(&mut self, idx: usize, value: CellColor) {
        if let Some(cell) = self.cells.get_mut(idx) {
            *cell = value;
        }
    }

    pub fn toggle(&mut self, idx: usize, selected: Color) -> bool {
        match self.cells.get_mut(idx) {
            Some(cell) => {
                *cell = cell.toggled(selected);
                true
            }
            None => false,
        }
    }
}

/// The drawdown chart, either as raised/lowered cells or colored cells.
///
/// A colored chart keeps the drawdown it was colored from so that edits and
/// reverse inference still see the weave structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chart {
    Drawdown(BoolGrid),
    Colored {
        colors: Vec<CellColor>,
        drawdown: BoolGrid,
    },
}

impl Chart {
    pub fn drawdown(&self) -> &BoolGrid {
        match self {
            Chart::Drawdown(grid) => grid,
            Chart::Colored { drawdown, .. } => drawdown,
        }
    }

    pub fn is_colored(&self) -> bool {
        matches!(self, Chart::Colored { .. })
    }

    pub fn colors(&self) -> Option<&[CellColor]> {
        match self {
            Chart::Drawdown(_) => None,
            Chart::Colored { colors, .. } => Some(colors),
        }
    }

    /// Flips one drawdown cell. A colored chart falls back to its drawdown,
    /// since the coloring no longer matches the edited structure.
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        let mut grid = self.drawdown().clone();
        if !grid.toggle(row, col) {
            return false;
        }
        *self = Chart::Drawdown(grid);
        true
    }
}

/// The complete pattern state for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaveState {
    /// shaftCount x chartWidth
    pub shaft: BoolGrid,
    /// shaftCount x treadleCount
    pub tieup: BoolGrid,
    /// chartHeight x treadleCount
    pub treadle: BoolGrid,
    /// chartHeight x chartWidth
    pub chart: Chart,
    pub warp_colors: ColorStrip,
    pub weft_colors: ColorStrip,
}

impl WeaveState {
    /// Allocates empty matrices sized for `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            shaft: BoolGrid::new(settings.shaft_count, settings.chart_width),
            tieup: BoolGrid::new(settings.shaft_count, settings.treadle_count),
            treadle: BoolGrid::new(settings.chart_height, settings.treadle_count),
            chart: Chart::Drawdown(BoolGrid::new(settings.chart_height, settings.chart_width)),
            warp_colors: ColorStrip::new(settings.chart_width),
            weft_colors: ColorStrip::new(settings.chart_height),
        }
    }

    /// True when every matrix has the shape `settings` calls for.
    pub fn fits(&self, settings: &Settings) -> bool {
        let shape = |grid: &BoolGrid, rows, cols| grid.rows() == rows && grid.cols() == cols;
        let chart_fits = match &self.chart {
            Chart::Drawdown(grid) => shape(grid, settings.chart_height, settings.chart_width),
            Chart::Colored { colors, drawdown } => {
                shape(drawdown, settings.chart_height, settings.chart_width)
                    && colors.len() == settings.chart_height * settings.chart_width
            }
        };
        shape(&self.shaft, settings.shaft_count, settings.chart_width)
            && shape(&self.tieup, settings.shaft_count, settings.treadle_count)
            && shape(&self.treadle, settings.chart_height, settings.treadle_count)
            && chart_fits
            && self.warp_colors.len() == settings.chart_width
            && self.weft_colors.len() == settings.chart_height
    }
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
