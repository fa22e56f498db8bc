use std::{fmt, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DraftError;

/// Allowed number of shafts and of treadles.
pub const COUNT_RANGE: RangeInclusive<usize> = 1..=20;
/// Allowed chart width (warp threads) and height (weft picks).
pub const DIMENSION_RANGE: RangeInclusive<usize> = 1..=100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieupLocation {
    #[default]
    RightUp,
    RightDown,
    LeftUp,
    LeftDown,
}

impl TieupLocation {
    pub const ALL: [TieupLocation; 4] = [
        TieupLocation::RightUp,
        TieupLocation::RightDown,
        TieupLocation::LeftUp,
        TieupLocation::LeftDown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TieupLocation::RightUp => "right-up",
            TieupLocation::RightDown => "right-down",
            TieupLocation::LeftUp => "left-up",
            TieupLocation::LeftDown => "left-down",
        }
    }
}

impl fmt::Display for TieupLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TieupLocation {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DraftError::InvalidFormat(format!("unknown tie-up location '{s}'")))
    }
}

/// Which transformation direction the session is working in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Threading, tie-up and treadling produce the drawdown.
    #[default]
    #[serde(rename = "to")]
    ToDraft,
    /// A hand-drawn drawdown produces threading, tie-up and treadling.
    #[serde(rename = "from")]
    FromDraft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadAction {
    #[default]
    Up,
    Down,
}

impl ThreadAction {
    /// Value a drawdown cell takes when its shaft/treadle pair is tied.
    pub fn raised_value(self) -> bool {
        self == ThreadAction::Up
    }
}

/// An opaque RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GRID_LINE: Color = Color::rgb(0x33, 0x33, 0x33);
    pub const DEFAULT_SELECTED: Color = Color::rgb(0x66, 0x66, 0x66);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DraftError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        let short = |idx: usize| {
            u8::from_str_radix(&hex[idx..idx + 1], 16)
                .map(|v| v * 0x11)
                .map_err(|_| invalid())
        };

        match hex.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            3 => Ok(Color::rgb(short(0)?, short(1)?, short(2)?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = DraftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// A color cell that may be left empty.
///
/// Serialized as `null` when unset; `"transparent"` and the empty string are
/// also read back as unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum CellColor {
    #[default]
    Unset,
    Set(Color),
}

impl CellColor {
    pub fn color(self) -> Option<Color> {
        match self {
            CellColor::Unset => None,
            CellColor::Set(color) => Some(color),
        }
    }

    /// Selecting the color already in the cell clears it; any other cell
    /// content is overwritten with `selected`.
    pub fn toggled(self, selected: Color) -> CellColor {
        if self == CellColor::Set(selected) {
            CellColor::Unset
        } else {
            CellColor::Set(selected)
        }
    }
}

impl From<Color> for CellColor {
    fn from(value: Color) -> Self {
        CellColor::Set(value)
    }
}

impl TryFrom<Option<String>> for CellColor {
    type Error = DraftError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(CellColor::Unset),
            Some(raw) if raw.eq_ignore_ascii_case("transparent") => Ok(CellColor::Unset),
            Some(raw) => raw.parse().map(CellColor::Set),
        }
    }
}

impl From<CellColor> for Option<String> {
    fn from(value: CellColor) -> Self {
        value.color().map(Color::to_hex)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub treadle_count: usize,
    pub shaft_count: usize,
    pub chart_width: usize,
    pub chart_height: usize,
    pub tieup_location: TieupLocation,
    pub mode: Mode,
    pub thread_action: ThreadAction,
    pub selected_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            treadle_count: 4,
            shaft_count: 4,
            chart_width: 40,
            chart_height: 40,
            tieup_location: TieupLocation::RightUp,
            mode: Mode::ToDraft,
            thread_action: ThreadAction::Up,
            selected_color: Color::DEFAULT_SELECTED,
        }
    }
}

pub fn clamp_count(value: i64) -> usize {
    clamp_into(value, &COUNT_RANGE)
}

pub fn clamp_dimension(value: i64) -> usize {
    clamp_into(value, &DIMENSION_RANGE)
}

fn clamp_into(value: i64, range: &RangeInclusive<usize>) -> usize {
    let lo = *range.start() as i64;
    let hi = *range.end() as i64;
    value.clamp(lo, hi) as usize
}

impl Settings {
    /// Returns a copy with every count and dimension pulled into range.
    pub fn clamped(&self) -> Self {
        Self {
            treadle_count: clamp_count(self.treadle_count as i64),
            shaft_count: clamp_count(self.shaft_count as i64),
            chart_width: clamp_dimension(self.chart_width as i64),
            chart_height: clamp_dimension(self.chart_height as i64),
            ..self.clone()
        }
    }

    /// Rejects out-of-range counts and dimensions instead of clamping them.
    pub fn validate(&self) -> Result<(), DraftError> {
        let checks = [
            ("treadleCount", self.treadle_count, &COUNT_RANGE),
            ("shaftCount", self.shaft_count, &COUNT_RANGE),
            ("chartWidth", self.chart_width, &DIMENSION_RANGE),
            ("chartHeight", self.chart_height, &DIMENSION_RANGE),
        ];
        for (name, value, range) in checks {
            if !range.contains(&value) {
                return Err(DraftError::InvalidFormat(format!(
                    "{name} {value} outside {}..={}",
                    range.start(),
                    range.end()
                )));
            }
        }
        Ok(())
    }

    /// True when `other` would need differently sized matrices.
    pub fn dimensions_differ(&self, other: &Settings) -> bool {
        self.treadle_count != other.treadle_count
            || self.shaft_count != other.shaft_count
            || self.chart_width != other.chart_width
            || self.chart_height != other.chart_height
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
