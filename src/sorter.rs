//! Reorderable Task Rows
//!
//! Lifecycle of the drag-to-reorder feature on the task table:
//!
//! ```text
//! Uninitialized -> DiscoveringRows -> AwaitingCapability -> Bound
//!                        |                    |
//!                        +------> Inert <-----+
//! ```
//!
//! The page calls `refresh` after replacing the rows and `destroy` before
//! tearing the table down. A generation counter makes any setup still in
//! flight give up once it has been superseded, so at most one binding exists.
//! An engine load in flight is shared by every setup that needs it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;
use serde::Serialize;

use crate::config::{CapabilitySources, SyncConfig, TaskTableConfig};
use crate::error::SorterError;
use crate::notify::Notifier;
use crate::order::{self, RowTable};
use crate::sync::{self, OrderEndpoint, SyncSequence};

/// Environment the sorter runs in (the browser, or a fake in tests)
#[async_trait(?Send)]
pub trait SorterHost {
    type Table: RowTable + 'static;
    /// Live drag binding; dropping it releases the engine
    type Binding: 'static;

    /// Locate the row container
    fn find_table(&self) -> Option<Self::Table>;

    /// Whether the drag engine is already loaded
    fn capability_available(&self) -> bool;

    /// Load the drag engine from one source
    async fn load_capability(&self, source: &str) -> Result<(), SorterError>;

    /// Attach the engine; `on_end` runs after every completed drag
    fn bind(&self, table: &Self::Table, on_end: Rc<dyn Fn()>) -> Result<Self::Binding, SorterError>;

    async fn sleep(&self, ms: u32);

    /// Run a detached task
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SorterState {
    Uninitialized,
    DiscoveringRows,
    AwaitingCapability,
    Bound,
    /// Nothing to act on (no table, no rows, no engine, or binding failed)
    Inert,
}

/// Snapshot returned by `check_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SorterStatus {
    pub state: SorterState,
    pub initialized: bool,
    pub instance: bool,
    pub container: bool,
}

type CapabilityLoad = Shared<LocalBoxFuture<'static, Result<(), SorterError>>>;

struct Inner<H: SorterHost> {
    host: H,
    endpoint: Rc<dyn OrderEndpoint>,
    notifier: Rc<dyn Notifier>,
    sources: CapabilitySources,
    sync: SyncConfig,
    refresh_delay_ms: u32,
    state: Cell<SorterState>,
    table: RefCell<Option<H::Table>>,
    binding: RefCell<Option<H::Binding>>,
    /// Cleared when the load settles, so a failure is retried next time
    pending_load: RefCell<Option<CapabilityLoad>>,
    generation: Cell<u64>,
    sequence: SyncSequence,
}

/// Drag-to-reorder controller for one task table
pub struct RowSorter<H: SorterHost> {
    inner: Rc<Inner<H>>,
}

impl<H: SorterHost> Clone for RowSorter<H> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<H: SorterHost + 'static> RowSorter<H> {
    pub fn new(
        host: H,
        endpoint: Rc<dyn OrderEndpoint>,
        notifier: Rc<dyn Notifier>,
        config: &TaskTableConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                endpoint,
                notifier,
                sources: config.sources.clone(),
                sync: config.sync.clone(),
                refresh_delay_ms: config.refresh_delay_ms,
                state: Cell::new(SorterState::Uninitialized),
                table: RefCell::new(None),
                binding: RefCell::new(None),
                pending_load: RefCell::new(None),
                generation: Cell::new(0),
                sequence: SyncSequence::default(),
            }),
        }
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.inner.host
    }

    pub fn state(&self) -> SorterState {
        self.inner.state.get()
    }

    fn set_state(&self, state: SorterState) {
        log::debug!("[SORTER] {:?} -> {:?}", self.inner.state.get(), state);
        self.inner.state.set(state);
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.inner.generation.get() != generation
    }

    /// Find the table, make sure the engine is loaded, bind it
    pub async fn setup(&self) {
        let generation = self.inner.generation.get();

        self.set_state(SorterState::DiscoveringRows);
        let Some(table) = self.inner.host.find_table() else {
            log::info!("[SORTER] no task table on this page");
            self.set_state(SorterState::Inert);
            return;
        };
        if order::orderable_count(&table.rows()) == 0 {
            log::warn!("[SORTER] no task rows to drag");
            self.set_state(SorterState::Inert);
            return;
        }
        *self.inner.table.borrow_mut() = Some(table);

        if !self.inner.host.capability_available() {
            self.set_state(SorterState::AwaitingCapability);
            let loaded = self.capability_load().await;
            if self.is_stale(generation) {
                log::debug!("[SORTER] setup superseded while loading");
                return;
            }
            if let Err(e) = loaded {
                log::error!("[SORTER] {}", e);
                self.set_state(SorterState::Inert);
                return;
            }
        }

        self.bind();
    }

    /// The engine load in flight, started if there is none
    fn capability_load(&self) -> CapabilityLoad {
        if let Some(pending) = self.inner.pending_load.borrow().as_ref() {
            log::debug!("[SORTER] joining engine load already in flight");
            return pending.clone();
        }
        let sorter = self.clone();
        let load: LocalBoxFuture<'static, Result<(), SorterError>> = Box::pin(async move {
            let result = sorter.load_capability().await;
            sorter.inner.pending_load.borrow_mut().take();
            result
        });
        let load = load.shared();
        *self.inner.pending_load.borrow_mut() = Some(load.clone());
        load
    }

    async fn load_capability(&self) -> Result<(), SorterError> {
        let sources = self.inner.sources.in_order();
        for (attempt, source) in sources.iter().enumerate() {
            if attempt > 0 {
                log::info!("[SORTER] trying fallback source {}", source);
            } else {
                log::info!("[SORTER] loading drag engine from {}", source);
            }
            match self.inner.host.load_capability(source).await {
                Ok(()) => {
                    log::info!("[SORTER] drag engine loaded from {}", source);
                    return Ok(());
                }
                Err(e) => log::warn!("[SORTER] {}", e),
            }
        }
        Err(SorterError::CapabilityUnavailable(sources.len()))
    }

    fn bind(&self) {
        let previous = self.inner.binding.borrow_mut().take();
        if previous.is_some() {
            log::debug!("[SORTER] releasing previous binding");
        }
        drop(previous);

        let table = self.inner.table.borrow();
        let Some(table) = table.as_ref() else {
            self.set_state(SorterState::Inert);
            return;
        };

        let weak = Rc::downgrade(&self.inner);
        let on_end: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                RowSorter { inner }.reorder_completed();
            }
        });

        match self.inner.host.bind(table, on_end) {
            Ok(binding) => {
                *self.inner.binding.borrow_mut() = Some(binding);
                self.set_state(SorterState::Bound);
                log::info!("[SORTER] drag reordering active");
            }
            Err(e) => {
                log::error!("[SORTER] {}", e);
                self.set_state(SorterState::Inert);
            }
        }
    }

    /// Drag finished: renumber, snapshot, sync in the background
    pub fn reorder_completed(&self) {
        if let Some(task) = self.handle_reorder() {
            self.inner.host.spawn(task);
        }
    }

    /// Renumber the rows and build the sync task for the new order.
    /// `None` when there is nothing to send.
    pub fn handle_reorder(&self) -> Option<LocalBoxFuture<'static, ()>> {
        let snapshot = {
            let table = self.inner.table.borrow();
            order::apply_reorder(table.as_ref()?)
        };
        log::debug!("[SORTER] new order: {:?}", snapshot.ids());
        if snapshot.is_empty() {
            log::warn!("[SORTER] no task ids found after reorder, nothing to save");
            return None;
        }

        let seq = self.inner.sequence.next();
        let inner = self.inner.clone();
        let task: LocalBoxFuture<'static, ()> = Box::pin(async move {
            // Outcome is logged and shown to the user inside
            let _ = sync::synchronize(inner.endpoint.as_ref(), inner.notifier.as_ref(), &inner.sync, &snapshot, seq).await;
        });
        Some(task)
    }

    /// Release the engine and forget the table
    pub fn destroy(&self) {
        self.inner.generation.set(self.inner.generation.get() + 1);
        let binding = self.inner.binding.borrow_mut().take();
        let released = binding.is_some();
        drop(binding);
        self.inner.table.borrow_mut().take();
        self.set_state(SorterState::Uninitialized);
        if released {
            log::info!("[SORTER] drag reordering released");
        }
    }

    /// Tear down, wait a moment for the new rows, set up again
    pub async fn refresh(&self) {
        self.destroy();
        let generation = self.inner.generation.get();
        self.inner.host.sleep(self.inner.refresh_delay_ms).await;
        if self.is_stale(generation) {
            log::debug!("[SORTER] refresh superseded");
            return;
        }
        self.setup().await;
    }

    pub fn status(&self) -> SorterStatus {
        SorterStatus {
            state: self.inner.state.get(),
            initialized: self.inner.state.get() == SorterState::Bound,
            instance: self.inner.binding.borrow().is_some(),
            container: self.inner.table.borrow().is_some(),
        }
    }

    /// `status`, also written to the log
    pub fn check_status(&self) -> SorterStatus {
        let status = self.status();
        log::info!("[SORTER] status: {:?}", status);
        status
    }
}
