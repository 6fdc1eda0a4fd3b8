use super::report::{self, Report};
use super::style;
use crate::egui_app::controller::AppController;
use crate::upload::UploadPhase;
use crate::validation::ACCEPTED_EXTENSIONS;
use eframe::egui::{self, Frame, Margin, RichText, Ui};
use rfd::FileDialog;
use std::time::Instant;

pub(super) fn render_analyze(ui: &mut Ui, controller: &mut AppController, now: Instant) {
    if let UploadPhase::Succeeded { file_name, result } = controller.upload_phase() {
        let mut reset = false;
        egui::ScrollArea::vertical()
            .id_salt("analysis_result_scroll")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Analysis Results");
                    ui.label(RichText::new(file_name).color(style::palette().text_muted));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        reset = ui.button("Analyze another call").clicked();
                    });
                });
                ui.add_space(12.0);
                report::render_report(ui, Report::from(result));
            });
        if reset {
            controller.reset_upload();
        }
        return;
    }
    render_drop_zone(ui, controller, now);
}

fn render_drop_zone(ui: &mut Ui, controller: &mut AppController, now: Instant) {
    let palette = style::palette();
    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
    let enabled = controller.upload_enabled();
    let stroke = if hovering && enabled {
        egui::Stroke::new(2.0, palette.accent)
    } else {
        style::card_stroke()
    };
    let mut picked = None;
    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        Frame::new()
            .fill(palette.bg_secondary)
            .stroke(stroke)
            .inner_margin(Margin::same(32))
            .show(ui, |ui| {
                ui.set_width(ui.available_width().min(560.0));
                ui.vertical_centered(|ui| {
                    let heading = if hovering {
                        "Drop your file here"
                    } else {
                        "Drag & drop your sales call recording"
                    };
                    ui.heading(heading);
                    ui.label(
                        RichText::new("Supports MP3, WAV, and MP4 files (max 50MB)")
                            .color(palette.text_muted),
                    );
                    ui.add_space(12.0);
                    if ui
                        .add_enabled(enabled, egui::Button::new("Browse Files"))
                        .clicked()
                    {
                        picked = FileDialog::new()
                            .add_filter("Call recordings", ACCEPTED_EXTENSIONS)
                            .pick_file();
                    }
                    if !controller.session().is_authenticated() {
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new("Sign in to analyze a recording.")
                                .color(palette.caution),
                        );
                    }
                    if let UploadPhase::Uploading { file, .. } = controller.upload_phase() {
                        let percent = controller.upload_progress(now).unwrap_or(0);
                        ui.add_space(16.0);
                        ui.add(
                            egui::ProgressBar::new(f32::from(percent) / 100.0)
                                .desired_width(360.0),
                        );
                        ui.label(
                            RichText::new(format!("Analyzing {}... {percent}%", file.file_name))
                                .color(palette.text_muted),
                        );
                    }
                });
            });
    });
    if let Some(path) = picked {
        controller.submit_recordings(vec![path]);
    }
}
