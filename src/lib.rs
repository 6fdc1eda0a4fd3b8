//! Library exports for reuse in benchmarks and tests.
/// Backend client and token persistence.
pub mod api;
/// Application directory resolution.
pub mod app_dirs;
/// Persisted settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Score, date and transcript formatting.
pub mod format;
/// History list filtering, paging and view state.
pub mod history;
pub(crate) mod http_client;
/// Tracing setup.
pub mod logging;
/// Wire records exchanged with the backend.
pub mod model;
/// Signed-in state.
pub mod session;
/// Upload-and-analyze workflow.
pub mod upload;
/// Client-side input checks.
pub mod validation;
