use super::{markdown, style};
use crate::format::{ScoreTier, Speaker, format_score, parse_transcript};
use crate::model::{AnalysisDetail, AnalysisResult, MetricResult};
use eframe::egui::{self, Frame, Margin, RichText, Ui};

/// Borrowed view over either a fresh result or a fetched history record.
pub(super) struct Report<'a> {
    pub overall_score: u8,
    pub metrics: &'a [MetricResult],
    pub recommendations: &'a [String],
    pub transcript: &'a str,
}

impl<'a> From<&'a AnalysisResult> for Report<'a> {
    fn from(result: &'a AnalysisResult) -> Self {
        Self {
            overall_score: result.overall_score,
            metrics: &result.metrics,
            recommendations: &result.recommendations,
            transcript: &result.transcript,
        }
    }
}

impl<'a> From<&'a AnalysisDetail> for Report<'a> {
    fn from(detail: &'a AnalysisDetail) -> Self {
        Self {
            overall_score: detail.overall_score,
            metrics: &detail.metrics,
            recommendations: &detail.recommendations,
            transcript: &detail.transcript,
        }
    }
}

fn card(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    Frame::new()
        .fill(style::palette().bg_secondary)
        .stroke(style::card_stroke())
        .inner_margin(Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
    ui.add_space(12.0);
}

pub(super) fn render_report(ui: &mut Ui, report: Report<'_>) {
    render_overall(ui, report.overall_score);
    card(ui, |ui| {
        ui.heading("Detailed Metrics");
        ui.add_space(8.0);
        if report.metrics.is_empty() {
            ui.label(RichText::new("No metrics were returned.").color(style::palette().text_muted));
        }
        for metric in report.metrics {
            render_metric(ui, metric);
        }
    });
    card(ui, |ui| {
        ui.heading("Recommendations");
        ui.add_space(8.0);
        for (index, recommendation) in report.recommendations.iter().enumerate() {
            ui.horizontal_top(|ui| {
                ui.label(RichText::new(format!("{}.", index + 1)).strong());
                ui.vertical(|ui| markdown::render(ui, recommendation));
            });
        }
    });
    card(ui, |ui| render_transcript(ui, report.transcript));
}

fn render_overall(ui: &mut Ui, score: u8) {
    let tier = ScoreTier::from_score(score);
    let color = style::tier_color(tier);
    card(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format_score(score)).size(40.0).strong().color(color));
            ui.add_space(12.0);
            ui.vertical(|ui| {
                ui.label(RichText::new("Overall Performance").strong());
                ui.label(RichText::new(tier.label()).color(color));
                ui.label(RichText::new(tier.summary()).color(style::palette().text_muted));
            });
        });
    });
}

fn render_metric(ui: &mut Ui, metric: &MetricResult) {
    let color = style::score_color(metric.score);
    ui.horizontal(|ui| {
        ui.label(RichText::new(&metric.name).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(format_score(metric.score)).color(color));
        });
    });
    ui.add(
        egui::ProgressBar::new(f32::from(metric.score.min(100)) / 100.0)
            .fill(color)
            .desired_height(6.0),
    );
    ui.add_space(4.0);
    markdown::render(ui, &metric.feedback);
    ui.add_space(10.0);
}

fn render_transcript(ui: &mut Ui, transcript: &str) {
    let lines = parse_transcript(transcript);
    egui::CollapsingHeader::new(RichText::new("Call Transcript").heading())
        .default_open(false)
        .show(ui, |ui| {
            if lines.is_empty() {
                ui.label(
                    RichText::new("No transcript available.").color(style::palette().text_muted),
                );
                return;
            }
            egui::ScrollArea::vertical()
                .id_salt("transcript_scroll")
                .max_height(320.0)
                .show(ui, |ui| {
                    for line in &lines {
                        let color = match line.speaker {
                            Speaker::Customer => style::palette().accent,
                            Speaker::Agent => style::palette().success,
                        };
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                RichText::new(format!("{}:", line.speaker.label()))
                                    .strong()
                                    .color(color),
                            );
                            ui.label(&line.text);
                        });
                    }
                });
        });
}
