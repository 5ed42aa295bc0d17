//! Log Level Toggle Component
//!
//! Small fixed badge showing the console log level. Each click moves to the
//! next level, stores it and applies it right away.

use leptos::prelude::*;

use crate::logging::{self, LogLevel};

#[component]
pub fn LogLevelToggle(initial: LogLevel) -> impl IntoView {
    let (level, set_level) = signal(initial);

    let cycle = move |_| {
        let next = level.get_untracked().next();
        logging::set_level(next);
        set_level.set(next);
        // Logged after the switch, so it only shows when the new level allows it
        log::info!("[LOG] level set to {}", next);
    };

    view! {
        <div
            id="log-toggle"
            class="log-level-toggle"
            style="position: fixed; top: 20px; right: 20px; z-index: 9999; background: rgba(0,0,0,0.8); color: white; padding: 10px; border-radius: 5px; font-size: 12px; cursor: pointer; font-family: monospace;"
            title="Clique para alternar"
            on:click=cycle
        >
            <div>{move || format!("📝 Logs: {}", level.get().as_str().to_uppercase())}</div>
            <div style="font-size: 10px; margin-top: 5px;">"Clique para alternar"</div>
        </div>
    }
}
