//! egui front end: controller, UI state and renderer.

/// Application controller and background job plumbing.
pub mod controller;
/// Plain state drawn by the renderer.
pub mod state;
/// egui renderer.
pub mod ui;
