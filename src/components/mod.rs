//! UI Components
//!
//! Leptos widgets mounted next to the server-rendered page.

mod log_level_toggle;

pub use log_level_toggle::LogLevelToggle;
