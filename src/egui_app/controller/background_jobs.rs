use super::jobs::JobMessage;
use super::*;

impl AppController {
    /// Drain worker results and apply them on the UI thread.
    pub(in crate::egui_app::controller) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };
            self.apply_job_message(message);
        }
    }

    pub(in crate::egui_app::controller) fn apply_job_message(&mut self, message: JobMessage) {
        match message {
            JobMessage::AnalysesLoaded(message) => self.handle_list_loaded(message),
            JobMessage::DetailLoaded(message) => self.handle_detail_loaded(message),
            JobMessage::AnalyzeFinished(message) => self.handle_analyze_finished(message),
            JobMessage::LoginFinished(message) => self.handle_login_finished(message),
            JobMessage::RegisterFinished(message) => self.handle_register_finished(message),
        }
    }
}
