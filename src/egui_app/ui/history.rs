use super::report::{self, Report};
use super::style;
use crate::egui_app::controller::AppController;
use crate::format::{format_display_date, format_score};
use crate::history::paging::{can_go_next, can_go_previous, shows_pagination};
use crate::history::{PageControl, ViewState, page_controls};
use eframe::egui::{self, RichText, Ui};

enum HistoryAction {
    Select(String),
    Refresh,
    Query(String),
    Page(usize),
    Previous,
    Next,
    Back,
}

pub(super) fn render_history(ui: &mut Ui, controller: &mut AppController) {
    if !controller.session().is_authenticated() {
        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.label("Sign in to view your analysis history.");
        });
        return;
    }
    let mut actions = Vec::new();
    match controller.history_view() {
        ViewState::Detail(detail) => {
            egui::ScrollArea::vertical()
                .id_salt("history_detail_scroll")
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("\u{2190} Back to History").clicked() {
                            actions.push(HistoryAction::Back);
                        }
                        ui.heading("Analysis Details");
                    });
                    ui.label(
                        RichText::new(format!(
                            "Analysis #{} \u{00b7} {}",
                            detail.id,
                            format_display_date(&detail.created_at)
                        ))
                        .color(style::palette().text_muted),
                    );
                    ui.add_space(12.0);
                    report::render_report(ui, Report::from(&**detail));
                });
        }
        ViewState::List => render_list(ui, controller, &mut actions),
    }
    for action in actions {
        match action {
            HistoryAction::Select(id) => controller.select_analysis(&id),
            HistoryAction::Refresh => controller.refresh_history(),
            HistoryAction::Query(query) => controller.set_history_query(&query),
            HistoryAction::Page(page) => controller.go_to_history_page(page),
            HistoryAction::Previous => controller.previous_history_page(),
            HistoryAction::Next => controller.next_history_page(),
            HistoryAction::Back => controller.back_to_history_list(),
        }
    }
}

fn render_list(ui: &mut Ui, controller: &AppController, actions: &mut Vec<HistoryAction>) {
    let palette = style::palette();
    ui.horizontal(|ui| {
        ui.heading("Analysis History");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let refreshing = controller.history_refreshing();
            let label = if refreshing { "Refreshing..." } else { "Refresh" };
            if ui
                .add_enabled(!refreshing, egui::Button::new(label))
                .clicked()
            {
                actions.push(HistoryAction::Refresh);
            }
            if refreshing {
                ui.add(egui::Spinner::new());
            }
        });
    });
    ui.add_space(8.0);

    let mut search = controller.ui.history_search.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut search)
            .hint_text("Search by ID or date...")
            .desired_width(320.0),
    );
    if response.changed() {
        actions.push(HistoryAction::Query(search));
    }
    ui.add_space(12.0);

    if controller.history_loading() {
        ui.vertical_centered(|ui| {
            ui.add_space(32.0);
            ui.add(egui::Spinner::new().size(28.0));
            ui.label(RichText::new("Loading analysis history...").color(palette.text_muted));
        });
        return;
    }

    let page = controller.history_page();
    if page.rows.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(32.0);
            ui.label(RichText::new("No matching analysis records found.").strong());
            ui.label(RichText::new(page.empty_hint()).color(palette.text_muted));
        });
    } else {
        let interactive = controller.history_rows_interactive();
        let pending = controller.pending_detail_id();
        egui::Grid::new("history_table")
            .num_columns(4)
            .striped(true)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                for header in ["ID", "Date", "Score", ""] {
                    ui.label(RichText::new(header).strong().color(palette.text_muted));
                }
                ui.end_row();
                for row in &page.rows {
                    ui.label(format!("#{}", row.id));
                    ui.label(format_display_date(&row.created_at));
                    ui.label(
                        RichText::new(format_score(row.overall_score))
                            .strong()
                            .color(style::score_color(row.overall_score)),
                    );
                    if pending == Some(row.id.as_str()) {
                        ui.add(egui::Spinner::new());
                    } else if ui
                        .add_enabled(interactive, egui::Button::new("View Details"))
                        .clicked()
                    {
                        actions.push(HistoryAction::Select(row.id.clone()));
                    }
                    ui.end_row();
                }
            });
    }

    if shows_pagination(page.total_pages) {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_go_previous(page.current_page), egui::Button::new("Previous"))
                .clicked()
            {
                actions.push(HistoryAction::Previous);
            }
            for control in page_controls(page.current_page, page.total_pages) {
                match control {
                    PageControl::Page { number, active } => {
                        if ui.selectable_label(active, number.to_string()).clicked() && !active {
                            actions.push(HistoryAction::Page(number));
                        }
                    }
                    PageControl::Ellipsis => {
                        ui.label("\u{2026}");
                    }
                }
            }
            if ui
                .add_enabled(
                    can_go_next(page.current_page, page.total_pages),
                    egui::Button::new("Next"),
                )
                .clicked()
            {
                actions.push(HistoryAction::Next);
            }
        });
    }
}
