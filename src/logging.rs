//! Console Logging
//!
//! `log` facade backed by the browser console. The level comes from
//! `?log=<level>` (remembered in localStorage), then localStorage, then a
//! host default: verbose on a dev machine, quiet in production.

use std::fmt;

use log::{Level, LevelFilter, Log, Metadata, Record};

pub const PREFIX: &str = "[SGP]";
pub const STORAGE_KEY: &str = "logLevel";
pub const URL_PARAM: &str = "log";

/// User-facing log level, including "off"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    None,
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// Toggle order
    pub const CYCLE: [LogLevel; 5] = [LogLevel::None, LogLevel::Error, LogLevel::Warn, LogLevel::Info, LogLevel::Debug];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Some(LogLevel::None),
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    pub fn filter(&self) -> LevelFilter {
        match self {
            LogLevel::None => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }

    /// Next level in the toggle cycle
    pub fn next(&self) -> Self {
        let idx = Self::CYCLE.iter().position(|l| l == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }

    /// Default when nothing was chosen
    pub fn host_default(hostname: &str) -> Self {
        match hostname {
            "localhost" | "127.0.0.1" => LogLevel::Debug,
            _ => LogLevel::Warn,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the effective level. Unknown strings are ignored.
pub fn resolve_level(url_param: Option<&str>, stored: Option<&str>, hostname: &str) -> LogLevel {
    url_param
        .and_then(LogLevel::parse)
        .or_else(|| stored.and_then(LogLevel::parse))
        .unwrap_or_else(|| LogLevel::host_default(hostname))
}

/// `<emoji> [SGP] [LEVEL] <time>: <message>`
pub fn format_line(level: Level, time: &str, message: &fmt::Arguments<'_>) -> String {
    let emoji = match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "ℹ️",
        Level::Debug => "🔍",
        Level::Trace => "📝",
    };
    let tag = level.as_str().to_ascii_uppercase();
    format!("{} {} [{}] {}: {}", emoji, PREFIX, tag, time, message)
}

/// Writes records to `console.*`
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let time = js_sys::Date::new_0().to_locale_time_string("default");
        let line = format_line(record.level(), &String::from(time), record.args());
        let line = wasm_bindgen::JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Persist `level` and apply it immediately
pub fn set_level(level: LogLevel) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(STORAGE_KEY, level.as_str());
    }
    log::set_max_level(level.filter());
}

/// Install the console logger and return the level in effect
pub fn init() -> LogLevel {
    let window = web_sys::window();
    let hostname = window
        .as_ref()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();
    let url_param = window
        .as_ref()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get(URL_PARAM))
        .filter(|p| LogLevel::parse(p).is_some());
    let stored = local_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());

    let level = resolve_level(url_param.as_deref(), stored.as_deref(), &hostname);
    if url_param.is_some() {
        set_level(level);
    }

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level.filter());
    }
    log::info!("logging ready, level={} host={}", level, hostname);
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_param_wins() {
        assert_eq!(resolve_level(Some("debug"), Some("error"), "app.example.com"), LogLevel::Debug);
    }

    #[test]
    fn test_stored_beats_host_default() {
        assert_eq!(resolve_level(None, Some("info"), "localhost"), LogLevel::Info);
        assert_eq!(resolve_level(None, Some("none"), "localhost"), LogLevel::None);
    }

    #[test]
    fn test_host_defaults() {
        assert_eq!(resolve_level(None, None, "localhost"), LogLevel::Debug);
        assert_eq!(resolve_level(None, None, "127.0.0.1"), LogLevel::Debug);
        assert_eq!(resolve_level(None, None, "sgp.onrender.com"), LogLevel::Warn);
    }

    #[test]
    fn test_unknown_values_ignored() {
        assert_eq!(resolve_level(Some("verbose"), Some("error"), "x"), LogLevel::Error);
        assert_eq!(resolve_level(Some("LOUD"), Some("???"), "x"), LogLevel::Warn);
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut level = LogLevel::None;
        let mut seen = vec![level];
        for _ in 0..5 {
            level = level.next();
            seen.push(level);
        }
        assert_eq!(
            seen,
            vec![LogLevel::None, LogLevel::Error, LogLevel::Warn, LogLevel::Info, LogLevel::Debug, LogLevel::None]
        );
    }

    #[test]
    fn test_format_line() {
        let line = format_line(Level::Warn, "10:42:00", &format_args!("{} rows", 3));
        assert_eq!(line, "⚠️ [SGP] [WARN] 10:42:00: 3 rows");
    }
}
