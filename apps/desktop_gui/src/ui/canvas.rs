use draft_core::{
    render::{DrawSurface, PixelRect},
    Point, Session,
};
use eframe::egui;
use shared::domain::Color;

const LABEL_FONT_SIZE: f32 = 12.0;

pub fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

/// Paints draft primitives with an egui painter, offset to the canvas rect.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    canvas: egui::Rect,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, canvas: egui::Rect) -> Self {
        Self { painter, canvas }
    }

    fn screen_rect(&self, rect: PixelRect) -> egui::Rect {
        egui::Rect::from_min_size(
            self.canvas.min + egui::vec2(rect.x as f32, rect.y as f32),
            egui::vec2(rect.width as f32, rect.height as f32),
        )
    }
}

impl DrawSurface for EguiSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.painter
            .rect_filled(self.canvas, egui::CornerRadius::ZERO, to_color32(color));
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.painter.rect_filled(
            self.screen_rect(rect),
            egui::CornerRadius::ZERO,
            to_color32(color),
        );
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Color) {
        self.painter.rect_stroke(
            self.screen_rect(rect),
            egui::CornerRadius::ZERO,
            egui::Stroke::new(1.0, to_color32(color)),
            egui::StrokeKind::Inside,
        );
    }

    fn label(&mut self, x: u32, y: u32, text: &str) {
        self.painter.text(
            self.canvas.min + egui::vec2(x as f32, y as f32),
            egui::Align2::LEFT_CENTER,
            text,
            egui::FontId::proportional(LABEL_FONT_SIZE),
            egui::Color32::BLACK,
        );
    }
}

/// Draws the session's canvas and returns the canvas-relative position of
/// a primary click, if one landed on it this frame.
pub fn show_canvas(ui: &mut egui::Ui, session: &Session) -> Option<Point> {
    let (width, height) = session.canvas_size();
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width as f32, height as f32), egui::Sense::click());

    let painter = ui.painter_at(rect);
    let mut surface = EguiSurface::new(&painter, rect);
    if let Err(err) = session.render(&mut surface) {
        painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::WHITE);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            err.to_string(),
            egui::FontId::proportional(16.0),
            egui::Color32::DARK_RED,
        );
        return None;
    }

    if !response.clicked() {
        return None;
    }
    let pos = response.interact_pointer_pos()?;
    let local = pos - rect.min;
    Some(Point::new(local.x, local.y))
}
