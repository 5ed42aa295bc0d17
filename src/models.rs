//! Frontend Models
//!
//! Row snapshots read from the task table and the order-update wire format.

use serde::{Deserialize, Serialize};

/// One `<tr>` of the task table as seen at snapshot time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    /// Server-assigned task id, if the row carries one
    pub id: Option<String>,
    /// The "new task" sentinel row
    pub pinned: bool,
}

#[cfg(test)]
impl RowSnapshot {
    pub fn task(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), pinned: false }
    }

    pub fn unidentified() -> Self {
        Self { id: None, pinned: false }
    }

    pub fn pinned() -> Self {
        Self { id: None, pinned: true }
    }
}

impl RowSnapshot {
    /// Trimmed id, `None` when missing or blank
    pub fn resolved_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// Task ids in display order, rebuilt after every drag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderSnapshot(Vec<String>);

impl OrderSnapshot {
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for OrderSnapshot {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Body of `POST /tarefas/atualizar_ordem`
#[derive(Debug, Serialize)]
pub struct UpdateOrderRequest<'a> {
    pub ids: &'a OrderSnapshot,
}

/// Per-task failure reported by the server on a partial update
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RowFailure {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    erro: Option<String>,
}

impl RowFailure {
    pub fn reason(&self) -> Option<&str> {
        first_message(&self.error, &self.erro)
    }
}

/// Reply of the order endpoint. The server speaks Portuguese field names,
/// older handlers the English ones; a reply may carry both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateOrderResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    sucesso: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    erro: Option<String>,
    #[serde(default)]
    errors: Vec<RowFailure>,
    #[serde(default)]
    erros: Vec<RowFailure>,
}

fn first_message<'a>(english: &'a Option<String>, portuguese: &'a Option<String>) -> Option<&'a str> {
    english
        .as_deref()
        .filter(|e| !e.is_empty())
        .or_else(|| portuguese.as_deref().filter(|e| !e.is_empty()))
}

impl UpdateOrderResponse {
    /// Either spelling of the success flag says yes
    pub fn succeeded(&self) -> bool {
        self.success.unwrap_or(false) || self.sucesso.unwrap_or(false)
    }

    /// Best description of why the update was refused
    pub fn failure_reason(&self) -> Option<String> {
        if let Some(error) = first_message(&self.error, &self.erro) {
            return Some(error.to_string());
        }
        let failures: Vec<&RowFailure> = self.errors.iter().chain(self.erros.iter()).collect();
        if failures.is_empty() {
            return None;
        }
        let details: Vec<String> = failures
            .iter()
            .map(|f| {
                let id = match &f.id {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                match f.reason() {
                    Some(e) => format!("{}: {}", id, e),
                    None => id,
                }
            })
            .collect();
        Some(format!("{} tarefa(s) não atualizada(s) ({})", failures.len(), details.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let snapshot: OrderSnapshot = vec!["7".to_string(), "3".to_string()].into_iter().collect();
        let body = serde_json::to_string(&UpdateOrderRequest { ids: &snapshot }).unwrap();
        assert_eq!(body, r#"{"ids":["7","3"]}"#);
    }

    #[test]
    fn test_response_accepts_portuguese_fields() {
        let resp: UpdateOrderResponse = serde_json::from_str(r#"{"sucesso": true}"#).unwrap();
        assert!(resp.succeeded());

        let resp: UpdateOrderResponse =
            serde_json::from_str(r#"{"sucesso": false, "erro": "Lista de IDs não enviada."}"#).unwrap();
        assert!(!resp.succeeded());
        assert_eq!(resp.failure_reason().as_deref(), Some("Lista de IDs não enviada."));
    }

    #[test]
    fn test_response_partial_failure_list() {
        let resp: UpdateOrderResponse = serde_json::from_str(
            r#"{"sucesso": false, "erros": [{"id": 12, "erro": "timeout"}, {"id": "x9", "erro": "404"}]}"#,
        )
        .unwrap();
        let reason = resp.failure_reason().unwrap();
        assert!(reason.starts_with("2 tarefa(s)"));
        assert!(reason.contains("12: timeout"));
        assert!(reason.contains("x9: 404"));
    }

    #[test]
    fn test_response_with_both_spellings() {
        let resp: UpdateOrderResponse =
            serde_json::from_str(r#"{"success": true, "sucesso": true, "message": "ok"}"#).unwrap();
        assert!(resp.succeeded());
        assert_eq!(resp.failure_reason(), None);

        let resp: UpdateOrderResponse =
            serde_json::from_str(r#"{"success": false, "sucesso": false, "error": "", "erro": "conflito"}"#).unwrap();
        assert!(!resp.succeeded());
        assert_eq!(resp.failure_reason().as_deref(), Some("conflito"));
    }

    #[test]
    fn test_resolved_id_trims_blank() {
        assert_eq!(RowSnapshot::task(" 42 ").resolved_id(), Some("42"));
        assert_eq!(RowSnapshot::task("   ").resolved_id(), None);
        assert_eq!(RowSnapshot::unidentified().resolved_id(), None);
    }
}
