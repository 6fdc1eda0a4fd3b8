use super::style;
use crate::egui_app::controller::AppController;
use eframe::egui::{self, Frame, Margin, RichText};

const TOAST_WIDTH: f32 = 300.0;

/// Bottom-right stack of dismissible notifications.
pub(super) fn render_notifications(ctx: &egui::Context, controller: &mut AppController) {
    if controller.ui.notifications.items().is_empty() {
        return;
    }
    let palette = style::palette();
    let mut dismissed = Vec::new();
    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for note in controller.ui.notifications.items() {
                Frame::new()
                    .fill(palette.bg_tertiary)
                    .stroke(egui::Stroke::new(1.0, style::tone_color(note.tone)))
                    .inner_margin(Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_width(TOAST_WIDTH);
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(&note.title)
                                    .strong()
                                    .color(style::tone_color(note.tone)),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("\u{00d7}").clicked() {
                                        dismissed.push(note.id);
                                    }
                                },
                            );
                        });
                        if !note.message.is_empty() {
                            ui.label(&note.message);
                        }
                    });
                ui.add_space(6.0);
            }
        });
    for id in dismissed {
        controller.dismiss_notification(id);
    }
}
