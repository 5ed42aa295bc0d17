//! Interactive control guard
//!
//! Form controls living inside a sortable row must stay usable: a press that
//! starts on an input or button must never reach the drag engine listening on
//! the container.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Press events the drag engine listens for. `click` is left alone so
/// delegated click handlers higher up keep working.
const PRESS_EVENTS: [&str; 3] = ["pointerdown", "mousedown", "touchstart"];

/// Stops press events on matching controls. Listeners are removed on drop.
pub struct ControlGuard {
    targets: Vec<web_sys::Element>,
    on_press: Closure<dyn FnMut(web_sys::Event)>,
}

impl ControlGuard {
    /// Guard every element under `container` matching `selector`
    pub fn install(container: &web_sys::Element, selector: &str) -> Result<Self, JsValue> {
        let on_press = Closure::<dyn FnMut(web_sys::Event)>::new(|ev: web_sys::Event| {
            ev.stop_propagation();
        });

        let nodes = container.query_selector_all(selector)?;
        let mut targets = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
                continue;
            };
            for event in PRESS_EVENTS {
                el.add_event_listener_with_callback(event, on_press.as_ref().unchecked_ref())?;
            }
            targets.push(el);
        }

        Ok(Self { targets, on_press })
    }

    /// Number of guarded controls
    pub fn guarded_count(&self) -> usize {
        self.targets.len()
    }
}

impl Drop for ControlGuard {
    fn drop(&mut self) {
        for el in &self.targets {
            for event in PRESS_EVENTS {
                let _ = el.remove_event_listener_with_callback(event, self.on_press.as_ref().unchecked_ref());
            }
        }
    }
}
