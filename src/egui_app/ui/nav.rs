use super::style;
use crate::egui_app::controller::AppController;
use crate::egui_app::state::Screen;
use eframe::egui::{self, Frame, Margin, RichText};

pub(super) fn render_nav_bar(ctx: &egui::Context, controller: &mut AppController) {
    let palette = style::palette();
    egui::TopBottomPanel::top("nav_bar")
        .frame(
            Frame::new()
                .fill(palette.bg_secondary)
                .inner_margin(Margin::symmetric(12, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Callgrade")
                        .strong()
                        .size(18.0)
                        .color(palette.accent),
                );
                ui.add_space(16.0);
                let signed_in = controller.session().is_authenticated();
                if signed_in {
                    for screen in [Screen::Analyze, Screen::History] {
                        let selected = controller.screen() == screen;
                        if ui.selectable_label(selected, screen.title()).clicked() {
                            controller.navigate(screen);
                        }
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if signed_in {
                        if ui.button("Logout").clicked() {
                            controller.logout();
                        }
                    } else {
                        for screen in [Screen::Register, Screen::Login] {
                            let selected = controller.screen() == screen;
                            if ui.selectable_label(selected, screen.title()).clicked() {
                                controller.navigate(screen);
                            }
                        }
                    }
                });
            });
        });
}
