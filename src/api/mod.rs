//! Client for the call analysis backend and the persisted session token.

mod token_store;

pub mod client;

pub use client::{ApiError, HttpBackend, Operation};
pub use token_store::{TokenStore, TokenStoreError};

use crate::model::{AnalysisDetail, AnalysisSummary, AnalyzeResponse, Credentials};
use crate::upload::UploadFile;

/// Operations the client needs from the analysis backend.
///
/// Every call blocks; the UI runs them on worker threads.
pub trait AnalysisBackend: Send + Sync {
    /// `GET /analyses`
    fn list_analyses(&self, token: &str) -> Result<Vec<AnalysisSummary>, ApiError>;
    /// `GET /analysis/{id}`
    fn analysis_detail(&self, token: &str, id: &str) -> Result<AnalysisDetail, ApiError>;
    /// `POST /analyze` with the recording as multipart field `file`.
    fn analyze(&self, token: &str, file: &UploadFile) -> Result<AnalyzeResponse, ApiError>;
    /// `POST /login`, returning the bearer token.
    fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;
    /// `POST /register`
    fn register(&self, credentials: &Credentials) -> Result<(), ApiError>;
}
