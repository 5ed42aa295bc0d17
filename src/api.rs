//! Page API
//!
//! `mountTaskTable` is called by the page once the task table is rendered.
//! Everything the sorter needs is passed in here; nothing is looked up on
//! `window` later.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::commands::HttpOrderEndpoint;
use crate::config::TaskTableConfig;
use crate::host::BrowserHost;
use crate::notify::PageNotifier;
use crate::recalc::{PageRecalc, RecalcPort};
use crate::sorter::RowSorter;

/// Handle returned to the page
#[wasm_bindgen]
pub struct TaskTable {
    sorter: RowSorter<BrowserHost>,
}

#[wasm_bindgen]
impl TaskTable {
    /// Rebind after the rows were replaced
    pub fn refresh(&self) {
        let sorter = self.sorter.clone();
        wasm_bindgen_futures::spawn_local(async move { sorter.refresh().await });
    }

    /// Release drag reordering
    pub fn destroy(&self) {
        self.sorter.destroy();
    }

    #[wasm_bindgen(js_name = checkStatus)]
    pub fn check_status(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.sorter.check_status())?)
    }
}

/// Parse the optional config object; `undefined`/`null` means defaults
fn parse_config(config: JsValue) -> Result<TaskTableConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(TaskTableConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&format!("invalid task table config: {}", e)))
}

/// Set up drag reordering for the task table.
///
/// * `config` - partial `TaskTableConfig` or `undefined`
/// * `notify` - toast function `(message, severity, durationMs)`; `alert` when absent
/// * `on_dates_edit` / `on_duration_edit` - the page's schedule recalculation
#[wasm_bindgen(js_name = mountTaskTable)]
pub fn mount_task_table(
    config: JsValue,
    notify: Option<js_sys::Function>,
    on_dates_edit: Option<js_sys::Function>,
    on_duration_edit: Option<js_sys::Function>,
) -> Result<TaskTable, JsValue> {
    let config = parse_config(config)?;
    let recalc = PageRecalc::new(on_dates_edit, on_duration_edit).map(|r| Rc::new(r) as Rc<dyn RecalcPort>);

    let endpoint = Rc::new(HttpOrderEndpoint::new(config.sync.endpoint.clone()));
    let notifier = Rc::new(PageNotifier::new(notify));
    let host = BrowserHost::new(config.clone(), recalc);
    let sorter = RowSorter::new(host, endpoint, notifier, &config);

    log::info!("[API] mounting task table on {}", config.table.container);
    let setup = sorter.clone();
    wasm_bindgen_futures::spawn_local(async move { setup.setup().await });

    Ok(TaskTable { sorter })
}
