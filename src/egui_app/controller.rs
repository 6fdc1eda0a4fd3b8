//! Owns application state and bridges backend work to the egui UI.

mod auth;
mod background_jobs;
mod history;
pub(crate) mod jobs;
mod upload;


use crate::api::{AnalysisBackend, HttpBackend, TokenStore};
use crate::config::{self, AppSettings};
use crate::egui_app::state::{NotificationTone, Screen, UiState};
use crate::history::{AnalysisStore, FilterState, HistoryView};
use crate::session::Session;
use crate::upload::UploadWorkflow;
use jobs::ControllerJobs;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// History screen model: fetched rows, search/page cursor, list/detail view.
#[derive(Debug, Default)]
pub(crate) struct HistoryModel {
    pub(crate) store: AnalysisStore,
    pub(crate) filter: FilterState,
    pub(crate) view: HistoryView,
    /// Set when the next visit to the History screen should fetch.
    pub(crate) needs_load: bool,
}

/// Maintains app state and bridges core logic to the egui UI.
pub struct AppController {
    pub ui: UiState,
    session: Session,
    history: HistoryModel,
    upload: UploadWorkflow,
    jobs: ControllerJobs,
}

impl AppController {
    pub fn new(backend: Arc<dyn AnalysisBackend>, session: Session, settings: AppSettings) -> Self {
        let ttl = Duration::from_secs(settings.notification_ttl_secs.max(1));
        let mut controller = Self {
            ui: UiState::new(ttl),
            session,
            history: HistoryModel {
                needs_load: true,
                ..HistoryModel::default()
            },
            upload: UploadWorkflow::default(),
            jobs: ControllerJobs::new(backend),
        };
        if !controller.session.is_authenticated() {
            controller.ui.screen = Screen::Login;
        }
        controller
    }

    /// Build the controller from persisted configuration and the saved token.
    pub fn load() -> Result<Self, String> {
        let settings =
            config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
        let base_url = settings
            .base_url()
            .map_err(|err| format!("Invalid API base URL: {err}"))?;
        tracing::info!("Using analysis backend at {base_url}");
        let session = match TokenStore::new() {
            Ok(store) => Session::restore(Arc::new(store)),
            Err(err) => {
                tracing::warn!("Token store unavailable, session will not persist: {err}");
                Session::ephemeral()
            }
        };
        Ok(Self::new(Arc::new(HttpBackend::new(base_url)), session, settings))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.ui.screen
    }

    /// Per-frame housekeeping: apply worker results, expire notifications
    /// and kick off the history load when due.
    pub fn tick(&mut self, now: Instant) {
        self.poll_background_jobs();
        self.ui.notifications.expire(now);
        if self.ui.screen == Screen::History && self.history.needs_load {
            self.load_history();
        }
    }

    /// Switch screens. Leaving History abandons its in-flight requests and
    /// any open detail; entering it schedules a fresh load.
    pub fn navigate(&mut self, screen: Screen) {
        if screen == self.ui.screen {
            return;
        }
        if self.ui.screen == Screen::History {
            self.leave_history();
        }
        if screen == Screen::History {
            self.history.needs_load = true;
        }
        tracing::debug!("Screen {:?} -> {:?}", self.ui.screen, screen);
        self.ui.screen = screen;
    }

    pub fn dismiss_notification(&mut self, id: u64) {
        self.ui.notifications.dismiss(id);
    }

    pub(crate) fn notify(
        &mut self,
        tone: NotificationTone,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.ui
            .notifications
            .push(tone, title, message, Instant::now());
    }

    pub(crate) fn notify_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.notify(NotificationTone::Error, "Error", message);
    }
}
