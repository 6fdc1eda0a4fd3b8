use super::jobs::AnalyzeResult;
use super::*;
use crate::upload::{UploadError, UploadOutcome, UploadPhase};
use std::path::PathBuf;

impl AppController {
    pub fn upload_phase(&self) -> &UploadPhase {
        self.upload.phase()
    }

    pub fn upload_progress(&self, now: Instant) -> Option<u8> {
        self.upload.progress(now)
    }

    /// Uploads need a session.
    pub fn upload_enabled(&self) -> bool {
        self.session.is_authenticated() && !self.upload.is_uploading()
    }

    /// Files picked or dropped on the Analyze screen. Only the first is used.
    pub fn submit_recordings(&mut self, paths: Vec<PathBuf>) {
        match self
            .upload
            .begin(&paths, self.session.token(), Instant::now())
        {
            Ok(ticket) => {
                tracing::info!(
                    "Uploading {} ({} bytes) for analysis",
                    ticket.file.file_name,
                    ticket.file.size_bytes
                );
                self.jobs.analyze(ticket);
            }
            Err(UploadError::Invalid(err)) => {
                tracing::info!("Rejected recording: {err}");
                self.notify(NotificationTone::Error, "Invalid file", err.to_string());
            }
            Err(err) => self.notify_error(err.to_string()),
        }
    }

    /// "Analyze another call": back to the drop zone.
    pub fn reset_upload(&mut self) {
        self.upload.reset();
    }

    pub(super) fn handle_analyze_finished(&mut self, message: AnalyzeResult) {
        match self.upload.finish(message.generation, message.result) {
            UploadOutcome::Succeeded { file_name } => {
                tracing::info!("Analysis finished for {file_name}");
                self.notify(
                    NotificationTone::Success,
                    "Analysis complete",
                    format!("{file_name} has been analyzed."),
                );
                self.history.needs_load = true;
            }
            UploadOutcome::Failed(error) => self.notify_error(error),
            UploadOutcome::Stale => tracing::debug!("Dropped stale analysis response"),
        }
    }
}
