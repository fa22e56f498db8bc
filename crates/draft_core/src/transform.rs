//! Draft transformations: drawdown generation, coloring and reverse
//! inference of threading, treadling and tie-up from a drawdown.
//!
//! All three are pure: they read their inputs and return fresh matrices.

use std::collections::HashMap;

use shared::domain::{CellColor, Color, Settings};

use crate::grid::{BoolGrid, ColorStrip};

/// Background for lowered cells whose weft has no color.
pub const DEFAULT_BACKGROUND: Color = Color::WHITE;

/// Computes the drawdown from threading, tie-up and treadling.
///
/// A cell is tied when any shaft threaded in its column is connected to any
/// treadle pressed in its row. Tied cells take `threadAction`'s raised value;
/// untied cells are always `false`.
pub fn generate_drawdown(
    settings: &Settings,
    shaft: &BoolGrid,
    tieup: &BoolGrid,
    treadle: &BoolGrid,
) -> BoolGrid {
    let raised = settings.thread_action.raised_value();
    let mut chart = BoolGrid::new(settings.chart_height, settings.chart_width);

    for row in 0..settings.chart_height {
        let pressed: Vec<usize> = (0..settings.treadle_count)
            .filter(|&t| treadle.get(row, t))
            .collect();
        if pressed.is_empty() {
            continue;
        }

        for col in 0..settings.chart_width {
            let tied = (0..settings.shaft_count)
                .filter(|&s| shaft.get(s, col))
                .any(|s| pressed.iter().any(|&t| tieup.get(s, t)));
            chart.set(row, col, tied && raised);
        }
    }

    chart
}

/// Colors a drawdown: raised cells show their warp color, lowered cells
/// their weft color.
pub fn colorize_drawdown(
    settings: &Settings,
    chart: &BoolGrid,
    warp_colors: &ColorStrip,
    weft_colors: &ColorStrip,
) -> Vec<CellColor> {
    let mut colors = Vec::with_capacity(settings.chart_height * settings.chart_width);
    for row in 0..settings.chart_height {
        for col in 0..settings.chart_width {
            let color = if chart.get(row, col) {
                warp_colors
                    .get(col)
                    .color()
                    .unwrap_or(settings.selected_color)
            } else {
                weft_colors.get(row).color().unwrap_or(DEFAULT_BACKGROUND)
            };
            colors.push(CellColor::Set(color));
        }
    }
    colors
}

/// Result of [`infer_threading_and_treadling`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub shaft: BoolGrid,
    pub treadle: BoolGrid,
    pub tieup: BoolGrid,
    /// Shaft index chosen for each chart column.
    pub shaft_of_column: Vec<usize>,
    /// Treadle index chosen for each chart row.
    pub treadle_of_row: Vec<usize>,
    /// Distinct column patterns found in the chart.
    pub column_classes: usize,
    /// Distinct row patterns found in the chart.
    pub row_classes: usize,
}

impl Inference {
    /// True when more patterns were found than shafts or treadles exist, so
    /// several patterns share the last shaft or treadle.
    pub fn is_lossy(&self, settings: &Settings) -> bool {
        self.column_classes > settings.shaft_count || self.row_classes > settings.treadle_count
    }
}

/// Infers threading, treadling and tie-up from a hand-drawn drawdown.
///
/// Identical columns share a shaft and identical rows share a treadle.
/// Pattern classes are numbered in first-seen order and take shafts
/// (treadles) in that order; once the last shaft is reached every further
/// class is collapsed onto it. The tie-up connects the shaft and treadle of
/// every cell whose value equals `threadAction`'s raised value.
///
/// When the chart has no more column patterns than shafts and no more row
/// patterns than treadles, feeding the result to [`generate_drawdown`]
/// reproduces the chart exactly for `threadAction = up`.
pub fn infer_threading_and_treadling(settings: &Settings, chart: &BoolGrid) -> Inference {
    let (width, height) = (settings.chart_width, settings.chart_height);

    let column_patterns: Vec<Vec<bool>> = (0..width)
        .map(|col| (0..height).map(|row| chart.get(row, col)).collect())
        .collect();
    let row_patterns: Vec<Vec<bool>> = (0..height)
        .map(|row| (0..width).map(|col| chart.get(row, col)).collect())
        .collect();

    let (shaft_of_column, column_classes) = assign_classes(&column_patterns, settings.shaft_count);
    let (treadle_of_row, row_classes) = assign_classes(&row_patterns, settings.treadle_count);

    let mut shaft = BoolGrid::new(settings.shaft_count, width);
    for (col, &s) in shaft_of_column.iter().enumerate() {
        shaft.set(s, col, true);
    }

    let mut treadle = BoolGrid::new(height, settings.treadle_count);
    for (row, &t) in treadle_of_row.iter().enumerate() {
        treadle.set(row, t, true);
    }

    let raised = settings.thread_action.raised_value();
    let mut tieup = BoolGrid::new(settings.shaft_count, settings.treadle_count);
    for (row, &t) in treadle_of_row.iter().enumerate() {
        for (col, &s) in shaft_of_column.iter().enumerate() {
            if chart.get(row, col) == raised {
                tieup.set(s, t, true);
            }
        }
    }

    Inference {
        shaft,
        treadle,
        tieup,
        shaft_of_column,
        treadle_of_row,
        column_classes,
        row_classes,
    }
}

/// Groups identical patterns in first-seen order and maps class `k` to
/// resource `min(k, capacity - 1)`. Returns the resource per pattern and the
/// number of distinct classes.
fn assign_classes(patterns: &[Vec<bool>], capacity: usize) -> (Vec<usize>, usize) {
    let last = capacity.saturating_sub(1);
    let mut class_of: HashMap<&[bool], usize> = HashMap::new();
    let assignments = patterns
        .iter()
        .map(|pattern| {
            let next_class = class_of.len();
            let class = *class_of.entry(pattern.as_slice()).or_insert(next_class);
            class.min(last)
        })
        .collect();
    (assignments, class_of.len())
}

#[cfg(test)]
#[path = "tests/transform_tests.rs"]
mod tests;
