use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{clamp_count, clamp_dimension, Color, Settings, TieupLocation};

pub const CONFIG_FILE_NAME: &str = "weave.toml";
const CONFIG_DIR_NAME: &str = "weave-draft";
const DEFAULT_LOG_FILTER: &str = "info";

/// Startup defaults for a design session.
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub settings: Settings,
    pub log_filter: String,
    /// Config file that was read, if any.
    pub source: Option<PathBuf>,
    /// Values that were ignored while loading, for logging once tracing is up.
    pub notes: Vec<String>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            log_filter: DEFAULT_LOG_FILTER.into(),
            source: None,
            notes: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    treadle_count: Option<i64>,
    shaft_count: Option<i64>,
    chart_width: Option<i64>,
    chart_height: Option<i64>,
    tieup_location: Option<String>,
    selected_color: Option<String>,
    log_filter: Option<String>,
}

/// `weave.toml` in the working directory, then in the user config dir.
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    candidates
}

pub fn load_config() -> StartupConfig {
    let path = config_file_candidates().into_iter().find(|p| p.is_file());
    load_config_from(path.as_deref(), |name| std::env::var(name).ok())
}

/// Defaults, then `path`, then `WEAVE__*` variables looked up through `env`.
pub fn load_config_from(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> StartupConfig {
    let mut config = StartupConfig::default();

    if let Some(path) = path {
        match read_file_config(path) {
            Ok(file_cfg) => {
                config.source = Some(path.to_path_buf());
                apply_file_config(&mut config, file_cfg);
            }
            Err(err) => config.notes.push(format!("{err:#}")),
        }
    }

    apply_env(&mut config, env);
    config
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse config '{}'", path.display()))
}

fn apply_file_config(config: &mut StartupConfig, file_cfg: FileConfig) {
    let settings = &mut config.settings;
    if let Some(v) = file_cfg.treadle_count {
        settings.treadle_count = clamp_count(v);
    }
    if let Some(v) = file_cfg.shaft_count {
        settings.shaft_count = clamp_count(v);
    }
    if let Some(v) = file_cfg.chart_width {
        settings.chart_width = clamp_dimension(v);
    }
    if let Some(v) = file_cfg.chart_height {
        settings.chart_height = clamp_dimension(v);
    }
    if let Some(v) = file_cfg.tieup_location {
        set_parsed(&mut settings.tieup_location, "tieup_location", &v, &mut config.notes);
    }
    if let Some(v) = file_cfg.selected_color {
        set_parsed(&mut settings.selected_color, "selected_color", &v, &mut config.notes);
    }
    if let Some(v) = file_cfg.log_filter {
        config.log_filter = v;
    }
}

fn apply_env(config: &mut StartupConfig, env: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| env(name).filter(|v| !v.trim().is_empty());
    let mut notes = Vec::new();

    let counts: [(&str, &mut usize, fn(i64) -> usize); 4] = [
        ("WEAVE__TREADLE_COUNT", &mut config.settings.treadle_count, clamp_count),
        ("WEAVE__SHAFT_COUNT", &mut config.settings.shaft_count, clamp_count),
        ("WEAVE__CHART_WIDTH", &mut config.settings.chart_width, clamp_dimension),
        ("WEAVE__CHART_HEIGHT", &mut config.settings.chart_height, clamp_dimension),
    ];
    for (name, slot, clamp) in counts {
        if let Some(v) = read(name) {
            match v.trim().parse::<i64>() {
                Ok(parsed) => *slot = clamp(parsed),
                Err(_) => notes.push(format!("{name}: '{v}' is not an integer")),
            }
        }
    }

    if let Some(v) = read("WEAVE__TIEUP_LOCATION") {
        set_parsed::<TieupLocation>(
            &mut config.settings.tieup_location,
            "WEAVE__TIEUP_LOCATION",
            &v,
            &mut notes,
        );
    }
    if let Some(v) = read("WEAVE__SELECTED_COLOR") {
        set_parsed::<Color>(
            &mut config.settings.selected_color,
            "WEAVE__SELECTED_COLOR",
            &v,
            &mut notes,
        );
    }
    if let Some(v) = read("WEAVE__LOG_FILTER") {
        config.log_filter = v;
    }

    config.notes.extend(notes);
}

fn set_parsed<T>(slot: &mut T, name: &str, raw: &str, notes: &mut Vec<String>)
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw.parse::<T>() {
        Ok(value) => *slot = value,
        Err(err) => notes.push(format!("{name}: {err}")),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
