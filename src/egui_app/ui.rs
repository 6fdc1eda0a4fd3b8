//! egui renderer for the application UI.

mod analyze;
mod auth;
mod history;
pub mod markdown;
mod nav;
mod notifications;
mod report;
pub mod style;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::egui_app::controller::AppController;
use crate::egui_app::state::Screen;
use eframe::egui::{self, Frame, Margin};

/// Smallest window that keeps the history table readable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(720.0, 520.0);
const BUSY_REPAINT: Duration = Duration::from_millis(100);
const IDLE_REPAINT: Duration = Duration::from_millis(500);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: AppController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app from persisted configuration and the saved session.
    pub fn new() -> Result<Self, String> {
        Ok(Self::with_controller(AppController::load()?))
    }

    pub fn with_controller(controller: AppController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn take_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if dropped.is_empty() || self.controller.screen() != Screen::Analyze {
            return;
        }
        if self.controller.upload_enabled() {
            self.controller.submit_recordings(dropped);
        }
    }

    fn busy(&self) -> bool {
        self.controller.history_loading()
            || self.controller.history_refreshing()
            || self.controller.pending_detail_id().is_some()
            || self.controller.ui.login.submitting
            || self.controller.ui.register.submitting
            || matches!(
                self.controller.upload_phase(),
                crate::upload::UploadPhase::Uploading { .. }
            )
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let now = Instant::now();
        self.controller.tick(now);
        self.take_dropped_files(ctx);

        nav::render_nav_bar(ctx, &mut self.controller);
        let palette = style::palette();
        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::same(16)),
            )
            .show(ctx, |ui| match self.controller.screen() {
                Screen::Analyze => analyze::render_analyze(ui, &mut self.controller, now),
                Screen::History => history::render_history(ui, &mut self.controller),
                Screen::Login => auth::render_login(ui, &mut self.controller),
                Screen::Register => auth::render_register(ui, &mut self.controller),
            });
        notifications::render_notifications(ctx, &mut self.controller);

        if self.busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        } else if !self.controller.ui.notifications.items().is_empty() {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}
