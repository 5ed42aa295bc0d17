//! Task Table Configuration
//!
//! Defaults match the production task page. The page may pass a partial
//! JSON object to `mountTaskTable`; missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use sortable_bridge::SortableOptions;

/// Complete configuration of the reorderable task table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskTableConfig {
    pub table: TableSelectors,
    pub drag: SortableOptions,
    /// Class added to the row while it is lifted
    pub dragging_class: String,
    /// Controls that must never start a drag
    pub guarded_controls: String,
    pub sources: CapabilitySources,
    pub sync: SyncConfig,
    /// Pause between teardown and rebuild on `refresh`, in ms
    pub refresh_delay_ms: u32,
}

impl Default for TaskTableConfig {
    fn default() -> Self {
        Self {
            table: TableSelectors::default(),
            drag: SortableOptions::default(),
            dragging_class: "dragging".to_string(),
            guarded_controls: "input, select, textarea, button, .btn".to_string(),
            sources: CapabilitySources::default(),
            sync: SyncConfig::default(),
            refresh_delay_ms: 100,
        }
    }
}

impl TaskTableConfig {
    /// Engine options for this table. Unset `draggable` / `filter` are derived
    /// from the effective pinned row id and label selector.
    pub fn drag_options(&self) -> SortableOptions {
        let table = &self.table;
        let mut drag = self.drag.clone();
        drag.draggable.get_or_insert_with(|| format!("tr:not(#{})", table.pinned_row_id));
        drag.filter.get_or_insert_with(|| {
            format!(
                "#{}, input, select, textarea, button, a, .btn, .form-control, .form-select, {}",
                table.pinned_row_id, table.label
            )
        });
        drag
    }
}

/// Where things live inside the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableSelectors {
    /// The row container
    pub container: String,
    /// `id` attribute of the "new task" row
    pub pinned_row_id: String,
    /// Element inside a row carrying the task id
    pub id_field: String,
    /// Attribute of `id_field` holding the id
    pub id_attribute: String,
    /// Cell showing the 1-based sequence number
    pub label: String,
}

impl Default for TableSelectors {
    fn default() -> Self {
        Self {
            container: "#tabela-tarefas-inline tbody".to_string(),
            pinned_row_id: "linha-nova-tarefa".to_string(),
            id_field: "input[name=\"nome\"]".to_string(),
            id_attribute: "data-id".to_string(),
            label: ".numero-tarefa".to_string(),
        }
    }
}

/// Script sources for the drag engine, tried in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapabilitySources {
    pub primary: String,
    pub secondary: String,
}

impl CapabilitySources {
    pub fn in_order(&self) -> [&str; 2] {
        [&self.primary, &self.secondary]
    }
}

impl Default for CapabilitySources {
    fn default() -> Self {
        Self {
            primary: "https://cdn.jsdelivr.net/npm/sortablejs@1.15.0/Sortable.min.js".to_string(),
            secondary: "https://unpkg.com/sortablejs@1.15.0/Sortable.min.js".to_string(),
        }
    }
}

/// Order endpoint and feedback timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    pub endpoint: String,
    pub success_toast_ms: u32,
    pub error_toast_ms: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: "/tarefas/atualizar_ordem".to_string(),
            success_toast_ms: 3000,
            error_toast_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_exclude_pinned_row() {
        let drag = TaskTableConfig::default().drag_options();
        assert_eq!(drag.draggable.as_deref(), Some("tr:not(#linha-nova-tarefa)"));
        let filter = drag.filter.unwrap();
        assert!(filter.starts_with("#linha-nova-tarefa, input"));
        assert!(filter.ends_with(".numero-tarefa"));
        assert_eq!(drag.handle, ".drag-handle");
    }

    #[test]
    fn test_pinned_row_override_follows_into_drag_options() {
        let config: TaskTableConfig = serde_json::from_str(r#"{"table": {"pinnedRowId": "nova"}}"#).unwrap();
        let drag = config.drag_options();
        assert_eq!(drag.draggable.as_deref(), Some("tr:not(#nova)"));
        let filter = drag.filter.unwrap();
        assert!(filter.starts_with("#nova, "));
        assert!(!filter.contains("linha-nova-tarefa"));
    }

    #[test]
    fn test_explicit_drag_selectors_kept() {
        let config: TaskTableConfig = serde_json::from_str(
            r#"{"table": {"pinnedRowId": "nova"}, "drag": {"draggable": "tr.tarefa", "filter": ".fixa"}}"#,
        )
        .unwrap();
        let drag = config.drag_options();
        assert_eq!(drag.draggable.as_deref(), Some("tr.tarefa"));
        assert_eq!(drag.filter.as_deref(), Some(".fixa"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: TaskTableConfig = serde_json::from_str(
            r#"{"sync": {"endpoint": "/api/ordem"}, "table": {"pinnedRowId": "nova"}, "refreshDelayMs": 0}"#,
        )
        .unwrap();
        assert_eq!(config.sync.endpoint, "/api/ordem");
        assert_eq!(config.sync.error_toast_ms, 5000);
        assert_eq!(config.table.pinned_row_id, "nova");
        assert_eq!(config.table.container, "#tabela-tarefas-inline tbody");
        assert_eq!(config.refresh_delay_ms, 0);
        assert_eq!(config.drag.animation, 150);
    }

    #[test]
    fn test_sources_order() {
        let sources = CapabilitySources::default();
        let [first, second] = sources.in_order();
        assert!(first.contains("jsdelivr"));
        assert!(second.contains("unpkg"));
    }
}
