//! Error Types
//!
//! Every failure here is local: it is logged or shown as a toast, never
//! propagated to the page.

use thiserror::Error;

/// Failures while attaching the drag engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SorterError {
    #[error("could not load drag engine from {source_url}: {reason}")]
    Load { source_url: String, reason: String },

    #[error("drag engine unavailable after trying {0} source(s)")]
    CapabilityUnavailable(usize),

    #[error("binding failed: {0}")]
    Bind(String),
}

/// Failures while pushing a new order to the server
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("server rejected the new order: {0}")]
    Rejected(String),

    #[error("server answered HTTP {status}")]
    Status { status: u16, reason: Option<String> },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unreadable response: {0}")]
    Decode(String),
}

impl SyncError {
    /// Text shown to the user in the error toast
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Rejected(reason) => format!("Erro ao atualizar ordem das tarefas: {}", reason),
            SyncError::Status { status, reason: Some(reason) } => {
                format!("Erro ao atualizar ordem das tarefas (HTTP {}): {}", status, reason)
            }
            SyncError::Status { status, reason: None } => {
                format!("Erro ao atualizar ordem das tarefas (HTTP {})", status)
            }
            SyncError::Transport(_) => "Erro de conexão ao atualizar ordem".to_string(),
            SyncError::Decode(_) => "Erro ao atualizar ordem das tarefas: resposta inválida do servidor".to_string(),
        }
    }
}
