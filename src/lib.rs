//! Basketball shooting report: loads per-shot-type biomechanics tables,
//! derives phase tables and set-point-annotated signal figures, and caches
//! the result per selected shot type.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod report;
pub mod state;
pub mod ui;
