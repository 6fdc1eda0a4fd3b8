//! Upload-and-analyze workflow: file selection, the in-flight request and
//! its synthetic progress, and the finished result.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::api::{ApiError, Operation};
use crate::history::Generation;
use crate::model::{AnalysisResult, AnalyzeResponse};
use crate::validation::{self, ValidationError};

/// Percentage points added per tick while waiting on the server.
pub const PROGRESS_STEP: u8 = 5;
pub const PROGRESS_TICK: Duration = Duration::from_millis(100);
/// Synthetic progress never passes this until the server answers.
pub const PROGRESS_CAP: u8 = 90;

/// A recording that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

impl UploadFile {
    /// Stat `path` and validate its name and size.
    pub fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let metadata = std::fs::metadata(path).map_err(|err| ValidationError::Unreadable {
            file_name: file_name.clone(),
            reason: err.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(ValidationError::Unreadable {
                file_name,
                reason: "not a file".into(),
            });
        }
        validation::check_recording(&file_name, metadata.len())?;
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size_bytes: metadata.len(),
        })
    }

    /// Content type sent with the multipart part.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// Pick the recording to analyze. Only the first path is considered.
pub fn select_upload(paths: &[PathBuf]) -> Result<UploadFile, ValidationError> {
    let first = paths.first().ok_or(ValidationError::NoFile)?;
    if paths.len() > 1 {
        tracing::debug!("Ignoring {} extra dropped files", paths.len() - 1);
    }
    UploadFile::from_path(first)
}

/// Time-driven stand-in for transfer progress.
///
/// Climbs [`PROGRESS_STEP`] points every [`PROGRESS_TICK`] up to
/// [`PROGRESS_CAP`]. It says nothing about bytes actually sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntheticProgress {
    started: Instant,
}

impl SyntheticProgress {
    pub fn start(now: Instant) -> Self {
        Self { started: now }
    }

    pub fn percent_at(&self, now: Instant) -> u8 {
        let ticks = now.saturating_duration_since(self.started).as_millis() / PROGRESS_TICK.as_millis();
        let percent = ticks.saturating_mul(u128::from(PROGRESS_STEP));
        percent.min(u128::from(PROGRESS_CAP)) as u8
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UploadPhase {
    Idle,
    Uploading {
        file: UploadFile,
        progress: SyntheticProgress,
    },
    Succeeded {
        file_name: String,
        result: AnalysisResult,
    },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UploadError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Sign in to analyze a recording")]
    SignedOut,
    #[error("An analysis is already running")]
    Busy,
}

/// Work handed to the upload worker.
#[derive(Clone, Debug)]
pub struct UploadTicket {
    pub generation: Generation,
    pub file: UploadFile,
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Succeeded { file_name: String },
    /// The workflow is back at `Idle`; the message is for the user.
    Failed(String),
    Stale,
}

/// `Idle -> Uploading -> Succeeded`, with failures returning to `Idle`.
#[derive(Debug)]
pub struct UploadWorkflow {
    phase: UploadPhase,
    generation: Generation,
}

impl Default for UploadWorkflow {
    fn default() -> Self {
        Self {
            phase: UploadPhase::Idle,
            generation: Generation::default(),
        }
    }
}

impl UploadWorkflow {
    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading { .. })
    }

    /// Displayed percentage: synthetic while uploading, 100 once done.
    pub fn progress(&self, now: Instant) -> Option<u8> {
        match &self.phase {
            UploadPhase::Idle => None,
            UploadPhase::Uploading { progress, .. } => Some(progress.percent_at(now)),
            UploadPhase::Succeeded { .. } => Some(100),
        }
    }

    /// Validate `paths` and start uploading the first one.
    ///
    /// Nothing is sent unless the file passes validation and a session
    /// token is present.
    pub fn begin(
        &mut self,
        paths: &[PathBuf],
        token: Option<&str>,
        now: Instant,
    ) -> Result<UploadTicket, UploadError> {
        let token = token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(UploadError::SignedOut)?;
        if self.is_uploading() {
            return Err(UploadError::Busy);
        }
        let file = select_upload(paths)?;
        self.generation = self.generation.next();
        self.phase = UploadPhase::Uploading {
            file: file.clone(),
            progress: SyntheticProgress::start(now),
        };
        Ok(UploadTicket {
            generation: self.generation,
            file,
            token: token.to_string(),
        })
    }

    /// Apply the server's answer for the upload tagged `generation`.
    pub fn finish(
        &mut self,
        generation: Generation,
        result: Result<AnalyzeResponse, ApiError>,
    ) -> UploadOutcome {
        if generation != self.generation {
            return UploadOutcome::Stale;
        }
        let UploadPhase::Uploading { file, .. } = &self.phase else {
            return UploadOutcome::Stale;
        };
        let file_name = file.file_name.clone();
        match result {
            Ok(response) => {
                self.phase = UploadPhase::Succeeded {
                    file_name: file_name.clone(),
                    result: response.into(),
                };
                UploadOutcome::Succeeded { file_name }
            }
            Err(err) => {
                self.phase = UploadPhase::Idle;
                UploadOutcome::Failed(err.user_message(Operation::Analyze))
            }
        }
    }

    /// Back to `Idle`, abandoning any request in flight.
    pub fn reset(&mut self) {
        self.generation = self.generation.next();
        self.phase = UploadPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnalyzeScores;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, len: u64) -> PathBuf {
        let path = dir.join(name);
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(len).unwrap();
        path
    }

    fn response(score: u8) -> AnalyzeResponse {
        AnalyzeResponse {
            analysis: AnalyzeScores {
                metrics: Vec::new(),
                overall_score: score,
                recommendations: vec!["Listen more".into()],
            },
            transcript: "John: Hi".into(),
        }
    }

    #[test]
    fn progress_climbs_in_steps_and_caps() {
        let start = Instant::now();
        let progress = SyntheticProgress::start(start);
        assert_eq!(progress.percent_at(start), 0);
        assert_eq!(progress.percent_at(start + Duration::from_millis(99)), 0);
        assert_eq!(progress.percent_at(start + Duration::from_millis(100)), 5);
        assert_eq!(progress.percent_at(start + Duration::from_millis(1_050)), 50);
        assert_eq!(progress.percent_at(start + Duration::from_secs(60)), PROGRESS_CAP);
    }

    #[test]
    fn only_first_file_is_taken() {
        let dir = tempdir().unwrap();
        let first = write_file(dir.path(), "first.mp3", 10);
        let second = write_file(dir.path(), "second.wav", 10);
        let file = select_upload(&[first.clone(), second]).unwrap();
        assert_eq!(file.path, first);
        assert_eq!(file.file_name, "first.mp3");
        assert_eq!(file.mime_type(), "audio/mpeg");
        assert_eq!(select_upload(&[]), Err(ValidationError::NoFile));
    }

    #[test]
    fn oversized_or_unsupported_files_never_start() {
        let dir = tempdir().unwrap();
        let big = write_file(dir.path(), "big.wav", 60 * 1024 * 1024);
        let text = write_file(dir.path(), "notes.txt", 10);
        let mut workflow = UploadWorkflow::default();
        let now = Instant::now();
        assert!(matches!(
            workflow.begin(&[big], Some("tok"), now),
            Err(UploadError::Invalid(ValidationError::TooLarge { .. }))
        ));
        assert!(matches!(
            workflow.begin(&[text], Some("tok"), now),
            Err(UploadError::Invalid(ValidationError::UnsupportedType { .. }))
        ));
        assert_eq!(workflow.phase(), &UploadPhase::Idle);
    }

    #[test]
    fn signed_out_upload_is_refused() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "call.mp3", 10);
        let mut workflow = UploadWorkflow::default();
        assert_eq!(
            workflow.begin(&[path], None, Instant::now()).unwrap_err(),
            UploadError::SignedOut
        );
    }

    #[test]
    fn success_jumps_to_full_progress() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "call.mp4", 10);
        let mut workflow = UploadWorkflow::default();
        let now = Instant::now();
        let ticket = workflow.begin(&[path.clone()], Some("tok"), now).unwrap();
        assert!(workflow.is_uploading());
        assert_eq!(
            workflow.begin(&[path], Some("tok"), now).unwrap_err(),
            UploadError::Busy
        );
        let outcome = workflow.finish(ticket.generation, Ok(response(78)));
        assert_eq!(
            outcome,
            UploadOutcome::Succeeded {
                file_name: "call.mp4".into()
            }
        );
        assert_eq!(workflow.progress(now), Some(100));
        match workflow.phase() {
            UploadPhase::Succeeded { result, .. } => assert_eq!(result.overall_score, 78),
            other => panic!("unexpected phase {other:?}"),
        }
        workflow.reset();
        assert_eq!(workflow.phase(), &UploadPhase::Idle);
    }

    #[test]
    fn failure_returns_to_idle_with_message() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "call.mp3", 10);
        let mut workflow = UploadWorkflow::default();
        let ticket = workflow.begin(&[path], Some("tok"), Instant::now()).unwrap();
        let outcome = workflow.finish(
            ticket.generation,
            Err(ApiError::Api {
                status: 413,
                message: Some("File too large".into()),
            }),
        );
        assert_eq!(outcome, UploadOutcome::Failed("File too large".into()));
        assert_eq!(workflow.phase(), &UploadPhase::Idle);
    }

    #[test]
    fn abandoned_upload_response_is_dropped() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "call.mp3", 10);
        let mut workflow = UploadWorkflow::default();
        let ticket = workflow.begin(&[path], Some("tok"), Instant::now()).unwrap();
        workflow.reset();
        assert_eq!(workflow.finish(ticket.generation, Ok(response(90))), UploadOutcome::Stale);
        assert_eq!(workflow.phase(), &UploadPhase::Idle);
    }
}
