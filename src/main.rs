//! SGP Task Table Frontend Entry Point
//!
//! Installs panic reporting and console logging, mounts the log level badge,
//! and exports `mountTaskTable` for the task page.

mod api;
mod commands;
mod components;
mod config;
mod error;
mod host;
mod logging;
mod models;
mod notify;
mod order;
mod recalc;
mod sorter;
mod styles;
mod sync;

use components::LogLevelToggle;
use leptos::prelude::*;
use logging::LogLevel;

fn main() {
    console_error_panic_hook::set_once();
    let level = logging::init();
    if level != LogLevel::None {
        mount_to_body(move || view! { <LogLevelToggle initial=level /> });
    }
}
