//! Import/export of the whole session as a JSON document.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use shared::{
    domain::Settings,
    error::DraftError,
    protocol::{ChartRecord, DraftDocument, WeaveStateRecord, FORMAT_VERSION},
};

use crate::grid::{BoolGrid, Chart, ColorStrip, WeaveState};

pub fn to_document(settings: &Settings, state: &WeaveState, now: DateTime<Utc>) -> DraftDocument {
    let (chart, drawdown) = match &state.chart {
        Chart::Drawdown(grid) => (ChartRecord::Drawdown(grid.cells().to_vec()), None),
        Chart::Colored { colors, drawdown } => (
            ChartRecord::Colored(colors.clone()),
            Some(drawdown.cells().to_vec()),
        ),
    };
    DraftDocument {
        settings: settings.clone(),
        weave_state: WeaveStateRecord {
            shaft: state.shaft.cells().to_vec(),
            tieup: state.tieup.cells().to_vec(),
            treadle: state.treadle.cells().to_vec(),
            chart,
            drawdown,
            warp_colors: state.warp_colors.cells().to_vec(),
            weft_colors: state.weft_colors.cells().to_vec(),
        },
        timestamp: Some(now),
        version: FORMAT_VERSION.to_string(),
    }
}

/// Serializes the session to pretty-printed JSON bytes.
pub fn export_document(
    settings: &Settings,
    state: &WeaveState,
    now: DateTime<Utc>,
) -> Result<Vec<u8>, DraftError> {
    let document = to_document(settings, state, now);
    serde_json::to_vec_pretty(&document)
        .map_err(|err| DraftError::InvalidFormat(format!("failed to encode document: {err}")))
}

/// Suggested file name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("weave-draft-{}.json", date.format("%Y-%m-%d"))
}

/// Parses and validates an exported document.
///
/// Syntax errors become [`DraftError::ReadError`]; a record lacking
/// `settings` or `weaveState`, or whose matrices do not fit its settings,
/// becomes [`DraftError::InvalidFormat`].
pub fn import_document(bytes: &[u8]) -> Result<(Settings, WeaveState), DraftError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| DraftError::ReadError(err.to_string()))?;

    let has = |key: &str| value.get(key).is_some_and(|v| !v.is_null());
    if !has("settings") || !has("weaveState") {
        return Err(DraftError::InvalidFormat(
            "missing settings or weaveState".to_string(),
        ));
    }

    if chart_mixes_kinds(&value) {
        return Err(DraftError::InvalidFormat(
            "chart mixes colors and booleans".to_string(),
        ));
    }

    let document: DraftDocument = serde_json::from_value(value)
        .map_err(|err| DraftError::InvalidFormat(err.to_string()))?;
    if document.version != FORMAT_VERSION {
        tracing::warn!(version = %document.version, "importing document with unexpected version");
    }

    document.settings.validate()?;
    let state = from_record(&document.settings, document.weave_state)?;
    Ok((document.settings, state))
}

/// True when `weaveState.chart` holds both boolean and color cells.
fn chart_mixes_kinds(value: &Value) -> bool {
    let Some(cells) = value
        .pointer("/weaveState/chart")
        .and_then(Value::as_array)
    else {
        return false;
    };
    let has_bool = cells.iter().any(Value::is_boolean);
    let has_color = cells.iter().any(|cell| cell.is_string() || cell.is_null());
    has_bool && has_color
}

fn from_record(settings: &Settings, record: WeaveStateRecord) -> Result<WeaveState, DraftError> {
    let (width, height) = (settings.chart_width, settings.chart_height);
    let grid = |name: &str, rows: usize, cols: usize, cells: Vec<bool>| {
        let len = cells.len();
        BoolGrid::from_cells(rows, cols, cells).ok_or_else(|| {
            DraftError::InvalidFormat(format!(
                "{name} has {len} cells, expected {rows}x{cols}"
            ))
        })
    };

    let chart = match record.chart {
        ChartRecord::Drawdown(cells) => Chart::Drawdown(grid("chart", height, width, cells)?),
        ChartRecord::Colored(colors) => {
            if colors.len() != width * height {
                return Err(DraftError::InvalidFormat(format!(
                    "chart has {} cells, expected {height}x{width}",
                    colors.len()
                )));
            }
            let drawdown = match record.drawdown {
                Some(cells) => grid("drawdown", height, width, cells)?,
                None => {
                    tracing::warn!("colored chart without drawdown; structure starts empty");
                    BoolGrid::new(height, width)
                }
            };
            Chart::Colored { colors, drawdown }
        }
    };

    let strip = |name: &str, expected: usize, cells| {
        let strip = ColorStrip::from_cells(cells);
        if strip.len() == expected {
            Ok(strip)
        } else {
            Err(DraftError::InvalidFormat(format!(
                "{name} has {} cells, expected {expected}",
                strip.len()
            )))
        }
    };

    Ok(WeaveState {
        shaft: grid("shaft", settings.shaft_count, width, record.shaft)?,
        tieup: grid(
            "tieup",
            settings.shaft_count,
            settings.treadle_count,
            record.tieup,
        )?,
        treadle: grid("treadle", height, settings.treadle_count, record.treadle)?,
        chart,
        warp_colors: strip("warpColors", width, record.warp_colors)?,
        weft_colors: strip("weftColors", height, record.weft_colors)?,
    })
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
