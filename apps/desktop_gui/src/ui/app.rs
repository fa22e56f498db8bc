use std::time::{Duration, Instant};

use draft_core::{Dimension, Session};
use eframe::egui;
use shared::{
    domain::{Color, Mode, Settings, ThreadAction, TieupLocation, COUNT_RANGE, DIMENSION_RANGE},
    error::{DraftError, Notice, Severity},
};

use crate::{
    controller::{
        events::NoticeLog,
        orchestration::{copy_canvas_to_clipboard, export_with_dialog, import_with_dialog},
    },
    ui::canvas::{show_canvas, to_color32},
};

pub struct WeaveApp {
    session: Session,
    notices: NoticeLog,
}

impl WeaveApp {
    pub fn new(settings: Settings) -> Self {
        let notices = NoticeLog::default();
        Self {
            session: Session::new(settings, notices.clone()),
            notices,
        }
    }

    fn show_dimensions(&mut self, ui: &mut egui::Ui) {
        let pending = self.session.pending_settings().clone();
        let fields = [
            ("Treadles", Dimension::TreadleCount, pending.treadle_count, &COUNT_RANGE),
            ("Shafts", Dimension::ShaftCount, pending.shaft_count, &COUNT_RANGE),
            ("Width", Dimension::ChartWidth, pending.chart_width, &DIMENSION_RANGE),
            ("Height", Dimension::ChartHeight, pending.chart_height, &DIMENSION_RANGE),
        ];
        for (label, dimension, current, range) in fields {
            ui.label(label);
            let mut value = current as i64;
            let range = (*range.start() as i64)..=(*range.end() as i64);
            if ui
                .add(egui::DragValue::new(&mut value).range(range).speed(0.2))
                .changed()
            {
                self.session.set_dimension(dimension, value);
            }
        }
    }

    fn show_selectors(&mut self, ui: &mut egui::Ui) {
        let settings = self.session.settings().clone();

        let mut location = settings.tieup_location;
        egui::ComboBox::from_id_salt("tieup_location")
            .selected_text(location.as_str())
            .show_ui(ui, |ui| {
                for option in TieupLocation::ALL {
                    ui.selectable_value(&mut location, option, option.as_str());
                }
            });
        if location != settings.tieup_location {
            self.session.set_tieup_location(location);
        }

        let mut mode = settings.mode;
        egui::ComboBox::from_id_salt("mode")
            .selected_text(mode_label(mode))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut mode, Mode::ToDraft, mode_label(Mode::ToDraft));
                ui.selectable_value(&mut mode, Mode::FromDraft, mode_label(Mode::FromDraft));
            });
        if mode != settings.mode {
            self.session.set_mode(mode);
        }

        let mut action = settings.thread_action;
        egui::ComboBox::from_id_salt("thread_action")
            .selected_text(action_label(action))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut action, ThreadAction::Up, action_label(ThreadAction::Up));
                ui.selectable_value(
                    &mut action,
                    ThreadAction::Down,
                    action_label(ThreadAction::Down),
                );
            });
        if action != settings.thread_action {
            self.session.set_thread_action(action);
        }

        ui.label("Color");
        let mut color = to_color32(settings.selected_color);
        if ui.color_edit_button_srgba(&mut color).changed() {
            self.session
                .set_selected_color(Color::rgb(color.r(), color.g(), color.b()));
        }
    }

    fn show_actions(&mut self, ui: &mut egui::Ui) {
        let initialize_label = if self.session.has_pending_dimensions() {
            "Initialize *"
        } else {
            "Initialize"
        };
        if ui.button(initialize_label).clicked() {
            self.session.initialize();
        }

        let to_draft = self.session.settings().mode == Mode::ToDraft;
        if ui
            .add_enabled(to_draft, egui::Button::new("Generate drawdown"))
            .clicked()
        {
            if let Err(err) = self.session.generate_drawdown() {
                tracing::debug!(%err, "generate drawdown refused");
            }
        }
        if ui
            .add_enabled(to_draft, egui::Button::new("Color chart"))
            .clicked()
        {
            if let Err(err) = self.session.generate_color_chart() {
                tracing::debug!(%err, "generate color chart refused");
            }
        }
        if ui
            .add_enabled(!to_draft, egui::Button::new("Threading from draft"))
            .clicked()
        {
            if let Err(err) = self.session.generate_from_draft() {
                tracing::debug!(%err, "generate from draft refused");
            }
        }

        ui.separator();
        if ui.button("Export…").clicked() {
            if let Err(err) = export_with_dialog(&self.session) {
                self.notices
                    .push(Notice::new(Severity::Error, format!("{err:#}")));
            }
        }
        if ui.button("Import…").clicked() {
            // Document errors were already reported by the session.
            match import_with_dialog(&mut self.session) {
                Err(err @ DraftError::Io(_)) => self.notices.push(Notice::from(&err)),
                Err(err) => tracing::debug!(%err, "import rejected"),
                Ok(_) => {}
            }
        }
        if ui.button("Copy image").clicked() {
            match copy_canvas_to_clipboard(&self.session) {
                Ok(()) => self
                    .notices
                    .push(Notice::new(Severity::Success, "Canvas copied to clipboard")),
                Err(err) => self.notices.push(Notice::new(
                    Severity::Error,
                    format!("Clipboard copy failed: {err}"),
                )),
            }
        }
    }

    fn show_notices(&self, ui: &mut egui::Ui) {
        let visible = self.notices.visible(Instant::now());
        if visible.is_empty() {
            ui.weak("Click cells to edit; generate to transform.");
            return;
        }
        for entry in visible.iter().rev() {
            let color = match entry.notice.severity {
                Severity::Error => egui::Color32::from_rgb(0xd0, 0x40, 0x40),
                Severity::Success => egui::Color32::from_rgb(0x3a, 0xa0, 0x5a),
                Severity::Info => ui.visuals().strong_text_color(),
            };
            ui.colored_label(color, &entry.notice.message);
        }
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::ToDraft => "To draft",
        Mode::FromDraft => "From draft",
    }
}

fn action_label(action: ThreadAction) -> &'static str {
    match action {
        ThreadAction::Up => "Thread up",
        ThreadAction::Down => "Thread down",
    }
}

impl eframe::App for WeaveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("settings_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                self.show_dimensions(ui);
                ui.separator();
                self.show_selectors(ui);
            });
            ui.horizontal_wrapped(|ui| self.show_actions(ui));
        });

        egui::TopBottomPanel::bottom("notice_strip").show(ctx, |ui| {
            self.show_notices(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                if let Some(point) = show_canvas(ui, &self.session) {
                    if let Ok(Some(_)) = self.session.click(point) {
                        ctx.request_repaint();
                    }
                }
            });
        });

        if !self.notices.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
