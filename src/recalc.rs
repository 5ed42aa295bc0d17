//! Schedule Recalculation Hooks
//!
//! Date and duration inputs in the task rows drive the page's own schedule
//! calculation. The page passes those functions in; we forward edits to them
//! through one delegated listener pair on the row container.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Which recalculation an edited field feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecalcField {
    /// `data_inicio` or `data_fim`
    Dates,
    /// `duracao`
    Duration,
}

impl RecalcField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "data_inicio" | "data_fim" => Some(RecalcField::Dates),
            "duracao" => Some(RecalcField::Duration),
            _ => None,
        }
    }
}

/// Edit events we react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Input,
    /// Focus left the field
    Commit,
}

/// What to call for an edit, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecalcCall {
    Dates,
    Duration { committed: bool },
}

/// Route an edit of field `name`. Date fields only react to typing.
pub fn route(name: &str, kind: EditKind) -> Option<RecalcCall> {
    match (RecalcField::from_name(name)?, kind) {
        (RecalcField::Dates, EditKind::Input) => Some(RecalcCall::Dates),
        (RecalcField::Dates, EditKind::Commit) => None,
        (RecalcField::Duration, EditKind::Input) => Some(RecalcCall::Duration { committed: false }),
        (RecalcField::Duration, EditKind::Commit) => Some(RecalcCall::Duration { committed: true }),
    }
}

/// Receiver of recalculation requests
pub trait RecalcPort {
    fn dates_edited(&self, field: &web_sys::HtmlInputElement);
    fn duration_edited(&self, field: &web_sys::HtmlInputElement, committed: bool);
}

/// Page-provided recalculation functions; either may be absent
pub struct PageRecalc {
    on_dates: Option<js_sys::Function>,
    on_duration: Option<js_sys::Function>,
}

impl PageRecalc {
    pub fn new(on_dates: Option<js_sys::Function>, on_duration: Option<js_sys::Function>) -> Option<Self> {
        if on_dates.is_none() && on_duration.is_none() {
            return None;
        }
        Some(Self { on_dates, on_duration })
    }
}

impl RecalcPort for PageRecalc {
    fn dates_edited(&self, field: &web_sys::HtmlInputElement) {
        if let Some(f) = &self.on_dates {
            if let Err(e) = f.call1(&JsValue::NULL, field) {
                log::error!("[RECALC] date recalculation threw: {:?}", e);
            }
        }
    }

    fn duration_edited(&self, field: &web_sys::HtmlInputElement, committed: bool) {
        if let Some(f) = &self.on_duration {
            let result = if committed {
                f.call2(&JsValue::NULL, field, &JsValue::TRUE)
            } else {
                f.call1(&JsValue::NULL, field)
            };
            if let Err(e) = result {
                log::error!("[RECALC] duration recalculation threw: {:?}", e);
            }
        }
    }
}

/// Delegated `input` / `focusout` listeners on the container.
/// Removed on drop, so rebinding never stacks them.
pub struct RecalcHooks {
    container: web_sys::Element,
    on_input: Closure<dyn FnMut(web_sys::Event)>,
    on_focusout: Closure<dyn FnMut(web_sys::Event)>,
}

impl RecalcHooks {
    pub fn attach(container: &web_sys::Element, port: std::rc::Rc<dyn RecalcPort>) -> Result<Self, JsValue> {
        let on_input = make_listener(port.clone(), EditKind::Input);
        let on_focusout = make_listener(port, EditKind::Commit);
        container.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        container.add_event_listener_with_callback("focusout", on_focusout.as_ref().unchecked_ref())?;
        Ok(Self {
            container: container.clone(),
            on_input,
            on_focusout,
        })
    }
}

impl Drop for RecalcHooks {
    fn drop(&mut self) {
        let _ = self.container.remove_event_listener_with_callback("input", self.on_input.as_ref().unchecked_ref());
        let _ = self.container.remove_event_listener_with_callback("focusout", self.on_focusout.as_ref().unchecked_ref());
    }
}

fn make_listener(port: std::rc::Rc<dyn RecalcPort>, kind: EditKind) -> Closure<dyn FnMut(web_sys::Event)> {
    Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let Some(field) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        match route(&field.name(), kind) {
            Some(RecalcCall::Dates) => port.dates_edited(&field),
            Some(RecalcCall::Duration { committed }) => port.duration_edited(&field, committed),
            None => {}
        }
    })
}
