//! Browser Host
//!
//! `SorterHost` / `RowTable` backed by the live document and SortableJS.

use std::rc::Rc;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use sortable_bridge::{ControlGuard, MoveEvent, Sortable, SortableCallbacks, SortableEvent};
use wasm_bindgen::{JsCast, JsValue};

use crate::config::{TableSelectors, TaskTableConfig};
use crate::error::SorterError;
use crate::models::RowSnapshot;
use crate::order::RowTable;
use crate::recalc::{RecalcHooks, RecalcPort};
use crate::sorter::SorterHost;
use crate::styles;

/// The task `<tbody>`
pub struct DomTable {
    body: web_sys::HtmlElement,
    selectors: TableSelectors,
}

impl DomTable {
    fn row_elements(&self) -> Vec<web_sys::Element> {
        let children = self.body.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .filter(|el| el.tag_name().eq_ignore_ascii_case("tr"))
            .collect()
    }

    fn snapshot(&self, row: &web_sys::Element) -> RowSnapshot {
        let pinned = row.id() == self.selectors.pinned_row_id;
        let id = row
            .query_selector(&self.selectors.id_field)
            .ok()
            .flatten()
            .and_then(|field| field.get_attribute(&self.selectors.id_attribute));
        RowSnapshot { id, pinned }
    }
}

impl RowTable for DomTable {
    fn rows(&self) -> Vec<RowSnapshot> {
        self.row_elements().iter().map(|row| self.snapshot(row)).collect()
    }

    fn set_label(&self, position: usize, label: usize) {
        let Some(row) = self.row_elements().into_iter().nth(position) else {
            return;
        };
        if let Ok(Some(cell)) = row.query_selector(&self.selectors.label) {
            cell.set_text_content(Some(&label.to_string()));
        }
    }
}

/// Everything attached to the table while bound; dropping it detaches all
pub struct BrowserBinding {
    _sortable: Sortable,
    _guard: ControlGuard,
    _recalc: Option<RecalcHooks>,
}

pub struct BrowserHost {
    config: TaskTableConfig,
    recalc: Option<Rc<dyn RecalcPort>>,
}

impl BrowserHost {
    pub fn new(config: TaskTableConfig, recalc: Option<Rc<dyn RecalcPort>>) -> Self {
        Self { config, recalc }
    }

    fn callbacks(&self, on_end: Rc<dyn Fn()>) -> SortableCallbacks {
        let lifted = self.config.dragging_class.clone();
        let dropped = lifted.clone();
        let pinned_id = self.config.table.pinned_row_id.clone();

        SortableCallbacks {
            on_start: Box::new(move |ev: SortableEvent| {
                let _ = ev.item().class_list().add_1(&lifted);
                log::debug!("[DND] drag started at {:?}", ev.old_index());
            }),
            on_end: Box::new(move |ev: SortableEvent| {
                let _ = ev.item().class_list().remove_1(&dropped);
                log::debug!("[DND] drag ended: {:?} -> {:?}", ev.old_index(), ev.new_index());
                on_end();
            }),
            // Never let a row land next to / past the pinned row
            on_move: Box::new(move |ev: MoveEvent| ev.related().map_or(true, |el| el.id() != pinned_id)),
        }
    }
}

fn bind_error(e: JsValue) -> SorterError {
    SorterError::Bind(format!("{:?}", e))
}

#[async_trait(?Send)]
impl SorterHost for BrowserHost {
    type Table = DomTable;
    type Binding = BrowserBinding;

    fn find_table(&self) -> Option<DomTable> {
        let document = web_sys::window()?.document()?;
        let body = document
            .query_selector(&self.config.table.container)
            .ok()
            .flatten()?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()?;
        Some(DomTable {
            body,
            selectors: self.config.table.clone(),
        })
    }

    fn capability_available(&self) -> bool {
        sortable_bridge::is_available()
    }

    async fn load_capability(&self, source: &str) -> Result<(), SorterError> {
        sortable_bridge::load_script(source).await.map_err(|e| SorterError::Load {
            source_url: source.to_string(),
            reason: e.to_string(),
        })
    }

    fn bind(&self, table: &DomTable, on_end: Rc<dyn Fn()>) -> Result<BrowserBinding, SorterError> {
        if let Err(e) = styles::install(&self.config) {
            log::warn!("[SORTER] could not install drag styles: {:?}", e);
        }

        let options = self.config.drag_options();
        let sortable = Sortable::create(&table.body, &options, self.callbacks(on_end)).map_err(bind_error)?;
        let guard = ControlGuard::install(&table.body, &self.config.guarded_controls).map_err(bind_error)?;
        let recalc = match &self.recalc {
            Some(port) => Some(RecalcHooks::attach(&table.body, port.clone()).map_err(bind_error)?),
            None => None,
        };
        log::info!("[SORTER] {} row control(s) kept editable", guard.guarded_count());

        Ok(BrowserBinding {
            _sortable: sortable,
            _guard: guard,
            _recalc: recalc,
        })
    }

    async fn sleep(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
