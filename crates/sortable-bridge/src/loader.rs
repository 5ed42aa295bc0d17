//! Lazy script loading
//!
//! Appends a `<script>` tag and resolves once the browser reports load or error.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Why a script could not be loaded
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// No window/document/head to attach to
    NoDocument,
    /// Creating or appending the tag threw
    Dom(String),
    /// The browser fired `error` for this source
    Failed(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NoDocument => write!(f, "no document available"),
            LoadError::Dom(msg) => write!(f, "DOM error: {}", msg),
            LoadError::Failed(src) => write!(f, "failed to load {}", src),
        }
    }
}

impl std::error::Error for LoadError {}

/// Load `src` as an async script.
///
/// A failed tag is removed again so a later call retries from scratch.
pub async fn load_script(src: &str) -> Result<(), LoadError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(LoadError::NoDocument)?;
    let head = document.head().ok_or(LoadError::NoDocument)?;

    let script = document
        .create_element("script")
        .map_err(|e| LoadError::Dom(format!("{:?}", e)))?
        .dyn_into::<web_sys::HtmlScriptElement>()
        .map_err(|e| LoadError::Dom(format!("{:?}", e)))?;
    script.set_src(src);
    script.set_async(true);

    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let tx_load = tx.clone();
    let on_load = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = tx_load.borrow_mut().take() {
            let _ = tx.send(true);
        }
    });
    let tx_error = tx.clone();
    let on_error = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = tx_error.borrow_mut().take() {
            let _ = tx.send(false);
        }
    });
    script.set_onload(Some(on_load.as_ref().unchecked_ref()));
    script.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    head.append_child(&script)
        .map_err(|e| LoadError::Dom(format!("{:?}", e)))?;

    let loaded = rx.await.unwrap_or(false);

    // Closures are dropped when this function returns; detach them first.
    script.set_onload(None);
    script.set_onerror(None);

    if loaded {
        Ok(())
    } else {
        script.remove();
        Err(LoadError::Failed(src.to_string()))
    }
}
