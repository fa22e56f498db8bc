use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CellColor, Settings};

pub const FORMAT_VERSION: &str = "2.0";

/// Top-level exported record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDocument {
    pub settings: Settings,
    pub weave_state: WeaveStateRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

/// The six matrices as flat row-major arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaveStateRecord {
    pub shaft: Vec<bool>,
    pub tieup: Vec<bool>,
    pub treadle: Vec<bool>,
    pub chart: ChartRecord,
    /// Boolean drawdown behind a colored chart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawdown: Option<Vec<bool>>,
    pub warp_colors: Vec<CellColor>,
    pub weft_colors: Vec<CellColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartRecord {
    Drawdown(Vec<bool>),
    Colored(Vec<CellColor>),
}

impl Default for ChartRecord {
    fn default() -> Self {
        ChartRecord::Drawdown(Vec::new())
    }
}
