use chrono::{DateTime, Utc};
use shared::{
    domain::{clamp_count, clamp_dimension, Color, Mode, Settings, ThreadAction, TieupLocation},
    error::{DraftError, Notice, Severity},
};
use tracing::{debug, info, warn};

use crate::{
    document,
    grid::{Chart, WeaveState},
    hit_test::{apply_hit, resolve_click, CellHit, Point},
    layout::{canvas_size, compute_region_origins, Layout},
    render::{render, DrawSurface},
    transform::{colorize_drawdown, generate_drawdown, infer_threading_and_treadling},
};

/// Receives user-facing messages. Fire-and-forget.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

impl<F> Notifier for F
where
    F: Fn(&str, Severity),
{
    fn notify(&self, message: &str, severity: Severity) {
        self(message, severity)
    }
}

/// Logs notifications instead of showing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(%message, "notification"),
            Severity::Success | Severity::Info => tracing::info!(%message, "notification"),
        }
    }
}

/// Matrix dimensions that only take effect on the next [`Session::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    TreadleCount,
    ShaftCount,
    ChartWidth,
    ChartHeight,
}

/// Owns the settings, the grid model and the notifier for one design
/// session. Every edit publishes a complete replacement [`WeaveState`].
pub struct Session {
    settings: Settings,
    pending: Settings,
    state: WeaveState,
    notifier: Box<dyn Notifier>,
}

impl Session {
    pub fn new(settings: Settings, notifier: impl Notifier + 'static) -> Self {
        let settings = settings.clamped();
        let state = WeaveState::new(&settings);
        Self {
            pending: settings.clone(),
            settings,
            state,
            notifier: Box::new(notifier),
        }
    }

    /// Active settings; these always match the grid model's shape.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings as edited, including dimensions not yet applied.
    pub fn pending_settings(&self) -> &Settings {
        &self.pending
    }

    pub fn has_pending_dimensions(&self) -> bool {
        self.settings.dimensions_differ(&self.pending)
    }

    pub fn state(&self) -> &WeaveState {
        &self.state
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    fn report(&self, err: &DraftError) {
        let notice = Notice::from(err);
        self.notify(&notice.message, notice.severity);
    }

    /// Discards the pattern and reallocates every matrix for the edited
    /// dimensions.
    pub fn initialize(&mut self) {
        self.settings = self.pending.clone();
        self.state = WeaveState::new(&self.settings);
        info!(
            shafts = self.settings.shaft_count,
            treadles = self.settings.treadle_count,
            width = self.settings.chart_width,
            height = self.settings.chart_height,
            "initialized weave"
        );
        self.notify("Initialize: all grids cleared", Severity::Success);
    }

    /// Stages a clamped dimension edit. Returns the value actually stored.
    pub fn set_dimension(&mut self, dimension: Dimension, value: i64) -> usize {
        let slot = match dimension {
            Dimension::TreadleCount => &mut self.pending.treadle_count,
            Dimension::ShaftCount => &mut self.pending.shaft_count,
            Dimension::ChartWidth => &mut self.pending.chart_width,
            Dimension::ChartHeight => &mut self.pending.chart_height,
        };
        *slot = match dimension {
            Dimension::TreadleCount | Dimension::ShaftCount => clamp_count(value),
            Dimension::ChartWidth | Dimension::ChartHeight => clamp_dimension(value),
        };
        *slot
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.settings.mode = mode;
        self.pending.mode = mode;
    }

    pub fn set_thread_action(&mut self, action: ThreadAction) {
        self.settings.thread_action = action;
        self.pending.thread_action = action;
    }

    pub fn set_selected_color(&mut self, color: Color) {
        self.settings.selected_color = color;
        self.pending.selected_color = color;
    }

    pub fn set_tieup_location(&mut self, location: TieupLocation) {
        self.settings.tieup_location = location;
        self.pending.tieup_location = location;
        if let Err(err) = compute_region_origins(&self.settings) {
            self.report(&err);
        }
    }

    pub fn layout(&self) -> Result<Layout, DraftError> {
        Layout::new(&self.settings)
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        canvas_size(&self.settings)
    }

    pub fn render(&self, surface: &mut dyn DrawSurface) -> Result<(), DraftError> {
        render(&self.settings, &self.state, surface)
    }

    /// Resolves a pointer click and flips the cell under it.
    pub fn click(&mut self, point: Point) -> Result<Option<CellHit>, DraftError> {
        let origins = compute_region_origins(&self.settings)?;
        let Some(hit) = resolve_click(point, &self.settings, &origins) else {
            return Ok(None);
        };
        debug!(region = hit.region.name(), row = hit.row, col = hit.col, "cell clicked");
        self.state = apply_hit(&self.state, hit, self.settings.selected_color);
        Ok(Some(hit))
    }

    fn require_mode(&self, mode: Mode, action: &'static str) -> Result<(), DraftError> {
        if self.settings.mode == mode {
            return Ok(());
        }
        let err = DraftError::ModeMismatch {
            action,
            mode: match self.settings.mode {
                Mode::ToDraft => "to-draft",
                Mode::FromDraft => "from-draft",
            },
        };
        self.report(&err);
        Err(err)
    }

    /// Replaces the chart with the drawdown of the current threading.
    pub fn generate_drawdown(&mut self) -> Result<(), DraftError> {
        self.require_mode(Mode::ToDraft, "Drawdown generation")?;
        let chart = generate_drawdown(
            &self.settings,
            &self.state.shaft,
            &self.state.tieup,
            &self.state.treadle,
        );
        self.state = WeaveState {
            chart: Chart::Drawdown(chart),
            ..self.state.clone()
        };
        info!("drawdown generated");
        self.notify("Drawdown generated", Severity::Success);
        Ok(())
    }

    /// Colors the current drawdown from the warp and weft colors.
    pub fn generate_color_chart(&mut self) -> Result<(), DraftError> {
        self.require_mode(Mode::ToDraft, "Color chart generation")?;
        let drawdown = self.state.chart.drawdown().clone();
        let colors = colorize_drawdown(
            &self.settings,
            &drawdown,
            &self.state.warp_colors,
            &self.state.weft_colors,
        );
        self.state = WeaveState {
            chart: Chart::Colored { colors, drawdown },
            ..self.state.clone()
        };
        info!("color chart generated");
        self.notify("Color chart generated", Severity::Success);
        Ok(())
    }

    /// Derives threading, treadling and tie-up from the drawn chart.
    pub fn generate_from_draft(&mut self) -> Result<(), DraftError> {
        self.require_mode(Mode::FromDraft, "Threading and treadling generation")?;
        let inference = infer_threading_and_treadling(&self.settings, self.state.chart.drawdown());

        if inference.is_lossy(&self.settings) {
            warn!(
                column_patterns = inference.column_classes,
                row_patterns = inference.row_classes,
                "pattern needs more shafts or treadles than available"
            );
            self.notify(
                &format!(
                    "Pattern has {} column and {} row patterns; extras share the last shaft or treadle",
                    inference.column_classes, inference.row_classes
                ),
                Severity::Info,
            );
        }

        self.state = WeaveState {
            shaft: inference.shaft,
            treadle: inference.treadle,
            tieup: inference.tieup,
            ..self.state.clone()
        };
        info!("threading and treadling generated");
        self.notify("Threading and treadling generated", Severity::Success);
        Ok(())
    }

    /// Serializes settings and grid model.
    pub fn export_document(&self, now: DateTime<Utc>) -> Result<Vec<u8>, DraftError> {
        match document::export_document(&self.settings, &self.state, now) {
            Ok(bytes) => {
                info!(bytes = bytes.len(), "exported draft");
                self.notify("Export completed", Severity::Success);
                Ok(bytes)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Replaces settings and grid model from an exported document. On any
    /// failure the session is left as it was.
    pub fn import_document(&mut self, bytes: &[u8]) -> Result<(), DraftError> {
        match document::import_document(bytes) {
            Ok((settings, state)) => {
                self.pending = settings.clone();
                self.settings = settings;
                self.state = state;
                info!("imported draft");
                self.notify("Import completed", Severity::Success);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "rejected draft import");
                self.report(&err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
