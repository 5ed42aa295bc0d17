//! Drag Feedback Styles
//!
//! One `<style>` tag with the drag states and the rules that keep row
//! controls clickable. Installed once per document.

use wasm_bindgen::JsValue;

use crate::config::TaskTableConfig;

pub const STYLE_ID: &str = "sgp-sortable-styles";

/// Stylesheet for the configured class names
pub fn stylesheet(config: &TaskTableConfig) -> String {
    let drag = &config.drag;
    format!(
        r#"
.{ghost} {{ opacity: 0.5; background: #f8f9fa !important; }}
.{chosen} {{ background: #e3f2fd !important; box-shadow: 0 2px 8px rgba(0,0,0,0.1); }}
.{dragged} {{ background: #fff !important; box-shadow: 0 4px 12px rgba(0,0,0,0.15); transform: rotate(5deg); }}
.{dragging} {{ cursor: grabbing !important; }}
{handle} {{ cursor: grab; color: #6c757d; transition: color 0.2s; }}
{handle}:hover {{ color: #007bff; }}
{handle}:active {{ cursor: grabbing; }}
{controls} {{ pointer-events: auto !important; }}
.form-control, .form-select, input, textarea {{ cursor: text; }}
.btn, button, select {{ cursor: pointer; }}
.form-control:focus, .form-select:focus {{ border-color: #007bff !important; box-shadow: 0 0 0 0.2rem rgba(0,123,255,.25) !important; }}
"#,
        ghost = drag.ghost_class,
        chosen = drag.chosen_class,
        dragged = drag.drag_class,
        dragging = config.dragging_class,
        handle = drag.handle,
        controls = config.guarded_controls,
    )
}

/// Add the stylesheet unless it is already there
pub fn install(config: &TaskTableConfig) -> Result<(), JsValue> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Ok(());
    };
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(&stylesheet(config)));
    if let Some(head) = document.head() {
        head.append_child(&style)?;
    }
    Ok(())
}
