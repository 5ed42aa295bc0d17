//! User Notifications
//!
//! The page may hand us its toast function. Without one (or if it throws)
//! feedback falls back to a blocking `alert`; it is never skipped.

use wasm_bindgen::JsValue;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Tag understood by the page's toast function
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// Anything that can show a transient message to the user
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity, duration_ms: u32);
}

/// Browser notifier: injected toast function, else `window.alert`
pub struct PageNotifier {
    toast: Option<js_sys::Function>,
}

impl PageNotifier {
    pub fn new(toast: Option<js_sys::Function>) -> Self {
        Self { toast }
    }

    fn alert(message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }
}

impl Notifier for PageNotifier {
    fn notify(&self, message: &str, severity: Severity, duration_ms: u32) {
        let Some(toast) = &self.toast else {
            Self::alert(message);
            return;
        };
        let shown = toast.call3(
            &JsValue::NULL,
            &JsValue::from_str(message),
            &JsValue::from_str(severity.as_str()),
            &JsValue::from(duration_ms),
        );
        if let Err(e) = shown {
            log::warn!("toast function threw, falling back to alert: {:?}", e);
            Self::alert(message);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every notification
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub shown: RefCell<Vec<(String, Severity, u32)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, severity: Severity, duration_ms: u32) {
            self.shown.borrow_mut().push((message.to_string(), severity, duration_ms));
        }
    }

    #[test]
    fn test_severity_tags() {
        assert_eq!(Severity::Success.as_str(), "success");
        assert_eq!(Severity::Error.as_str(), "error");
    }
}
