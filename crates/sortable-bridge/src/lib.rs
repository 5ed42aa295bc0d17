//! Sortable Bridge
//!
//! Typed bindings to the SortableJS drag engine for wasm-bindgen frontends.
//! The engine is an external script: probe it with [`is_available`], fetch it
//! with [`load_script`], then attach it to a container with [`Sortable::create`].

mod guard;
mod loader;

pub use guard::ControlGuard;
pub use loader::{load_script, LoadError};

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Sortable)]
    type RawSortable;

    #[wasm_bindgen(constructor, js_class = "Sortable", catch)]
    fn new(el: &web_sys::HtmlElement, options: &JsValue) -> Result<RawSortable, JsValue>;

    #[wasm_bindgen(method, js_class = "Sortable")]
    fn destroy(this: &RawSortable);

    /// Event passed to `onStart` / `onEnd`
    pub type SortableEvent;

    #[wasm_bindgen(method, getter)]
    pub fn item(this: &SortableEvent) -> web_sys::HtmlElement;

    #[wasm_bindgen(method, getter, js_name = oldIndex)]
    pub fn old_index(this: &SortableEvent) -> Option<u32>;

    #[wasm_bindgen(method, getter, js_name = newIndex)]
    pub fn new_index(this: &SortableEvent) -> Option<u32>;

    /// Event passed to `onMove`
    pub type MoveEvent;

    #[wasm_bindgen(method, getter)]
    pub fn related(this: &MoveEvent) -> Option<web_sys::Element>;
}

/// Plain Sortable options (everything except callbacks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortableOptions {
    /// Selector restricting where a drag may start
    pub handle: String,
    /// Selector for elements that may be dragged at all; engine default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draggable: Option<String>,
    /// Selectors that never start a drag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Let events on filtered elements keep their default action
    pub prevent_on_filter: bool,
    /// Reorder animation in ms
    pub animation: u32,
    /// Hold time before a drag starts, in ms
    pub delay: u32,
    /// Apply `delay` only to touch input
    pub delay_on_touch_only: bool,
    /// Pixels a touch may move during `delay` before it counts as a scroll
    pub touch_start_threshold: u32,
    pub force_fallback: bool,
    pub fallback_on_body: bool,
    pub fallback_tolerance: u32,
    /// Class of the drop placeholder
    pub ghost_class: String,
    /// Class of the lifted row
    pub chosen_class: String,
    /// Class of the row while it follows the pointer
    pub drag_class: String,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            handle: ".drag-handle".to_string(),
            draggable: None,
            filter: None,
            prevent_on_filter: false,
            animation: 150,
            delay: 150,
            delay_on_touch_only: true,
            touch_start_threshold: 3,
            force_fallback: false,
            fallback_on_body: true,
            fallback_tolerance: 3,
            ghost_class: "sortable-ghost".to_string(),
            chosen_class: "sortable-chosen".to_string(),
            drag_class: "sortable-drag".to_string(),
        }
    }
}

/// Rust-side callbacks installed on a Sortable instance
pub struct SortableCallbacks {
    pub on_start: Box<dyn FnMut(SortableEvent)>,
    pub on_end: Box<dyn FnMut(SortableEvent)>,
    /// Return `false` to refuse `related` as a drop neighbour
    pub on_move: Box<dyn FnMut(MoveEvent) -> bool>,
}

/// A live Sortable instance. Dropping it destroys the instance and
/// releases the callbacks.
pub struct Sortable {
    raw: RawSortable,
    _on_start: Closure<dyn FnMut(SortableEvent)>,
    _on_end: Closure<dyn FnMut(SortableEvent)>,
    _on_move: Closure<dyn FnMut(MoveEvent) -> bool>,
}

impl Sortable {
    /// Attach the engine to `el`
    pub fn create(
        el: &web_sys::HtmlElement,
        options: &SortableOptions,
        callbacks: SortableCallbacks,
    ) -> Result<Self, JsValue> {
        let js_options = serde_wasm_bindgen::to_value(options)?;

        let on_start = Closure::wrap(callbacks.on_start);
        let on_end = Closure::wrap(callbacks.on_end);
        let on_move = Closure::wrap(callbacks.on_move);
        js_sys::Reflect::set(&js_options, &"onStart".into(), on_start.as_ref().unchecked_ref())?;
        js_sys::Reflect::set(&js_options, &"onEnd".into(), on_end.as_ref().unchecked_ref())?;
        js_sys::Reflect::set(&js_options, &"onMove".into(), on_move.as_ref().unchecked_ref())?;

        let raw = RawSortable::new(el, &js_options)?;
        Ok(Self {
            raw,
            _on_start: on_start,
            _on_end: on_end,
            _on_move: on_move,
        })
    }
}

impl Drop for Sortable {
    fn drop(&mut self) {
        self.raw.destroy();
    }
}

/// Whether the `Sortable` global is defined
pub fn is_available() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Sortable")).unwrap_or(false)
}
