//! Order Synchronization
//!
//! Pushes a complete order snapshot to the server and tells the user how it
//! went. One request per drag: no retry, no debounce, no rollback.

use std::cell::Cell;

use async_trait::async_trait;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::models::OrderSnapshot;
use crate::notify::{Notifier, Severity};

pub const SUCCESS_MESSAGE: &str = "Ordem das tarefas atualizada com sucesso!";

/// Remote "update order" endpoint
#[async_trait(?Send)]
pub trait OrderEndpoint {
    /// Replace the server order with `snapshot`
    async fn update_order(&self, snapshot: &OrderSnapshot) -> Result<(), SyncError>;
}

/// Hands out request sequence numbers. Responses may arrive out of order;
/// the number only shows up in logs.
#[derive(Debug, Default)]
pub struct SyncSequence(Cell<u64>);

impl SyncSequence {
    pub fn next(&self) -> u64 {
        let seq = self.0.get() + 1;
        self.0.set(seq);
        seq
    }
}

/// Send `snapshot` and notify the outcome. An empty snapshot is not sent.
pub async fn synchronize(
    endpoint: &dyn OrderEndpoint,
    notifier: &dyn Notifier,
    config: &SyncConfig,
    snapshot: &OrderSnapshot,
    seq: u64,
) -> Result<(), SyncError> {
    if snapshot.is_empty() {
        log::debug!("[SYNC #{}] empty snapshot, nothing to send", seq);
        return Ok(());
    }

    log::info!("[SYNC #{}] sending order of {} task(s): {:?}", seq, snapshot.len(), snapshot.ids());
    match endpoint.update_order(snapshot).await {
        Ok(()) => {
            log::info!("[SYNC #{}] order saved", seq);
            notifier.notify(SUCCESS_MESSAGE, Severity::Success, config.success_toast_ms);
            Ok(())
        }
        Err(e) => {
            log::error!("[SYNC #{}] {}", seq, e);
            notifier.notify(&e.user_message(), Severity::Error, config.error_toast_ms);
            Err(e)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::notify::tests::RecordingNotifier;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Endpoint answering from a script and recording what it was sent
    #[derive(Default)]
    pub(crate) struct ScriptedEndpoint {
        pub replies: RefCell<VecDeque<Result<(), SyncError>>>,
        pub sent: RefCell<Vec<Vec<String>>>,
    }

    impl ScriptedEndpoint {
        pub fn replying(replies: Vec<Result<(), SyncError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl OrderEndpoint for ScriptedEndpoint {
        async fn update_order(&self, snapshot: &OrderSnapshot) -> Result<(), SyncError> {
            self.sent.borrow_mut().push(snapshot.ids().to_vec());
            self.replies.borrow_mut().pop_front().unwrap_or(Ok(()))
        }
    }

    fn snapshot(ids: &[&str]) -> OrderSnapshot {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_success_shows_success_toast() {
        let endpoint = ScriptedEndpoint::replying(vec![Ok(())]);
        let notifier = RecordingNotifier::default();
        let config = SyncConfig::default();

        let result = synchronize(&endpoint, &notifier, &config, &snapshot(&["B", "C", "A"]), 1).await;
        assert!(result.is_ok());
        assert_eq!(*endpoint.sent.borrow(), vec![vec!["B", "C", "A"]]);
        assert_eq!(
            *notifier.shown.borrow(),
            vec![(SUCCESS_MESSAGE.to_string(), Severity::Success, 3000)]
        );
    }

    #[tokio::test]
    async fn test_rejection_shows_server_reason() {
        let endpoint = ScriptedEndpoint::replying(vec![Err(SyncError::Rejected("conflict".into()))]);
        let notifier = RecordingNotifier::default();
        let config = SyncConfig::default();

        let result = synchronize(&endpoint, &notifier, &config, &snapshot(&["B", "C", "A"]), 1).await;
        assert_eq!(result, Err(SyncError::Rejected("conflict".into())));
        let shown = notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].0.contains("conflict"));
        assert_eq!(shown[0].1, Severity::Error);
        assert_eq!(shown[0].2, 5000);
    }

    #[tokio::test]
    async fn test_empty_snapshot_makes_no_request() {
        let endpoint = ScriptedEndpoint::default();
        let notifier = RecordingNotifier::default();

        let result = synchronize(&endpoint, &notifier, &SyncConfig::default(), &OrderSnapshot::default(), 1).await;
        assert!(result.is_ok());
        assert!(endpoint.sent.borrow().is_empty());
        assert!(notifier.shown.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_no_retry_after_transport_error() {
        let endpoint = ScriptedEndpoint::replying(vec![Err(SyncError::Transport("offline".into()))]);
        let notifier = RecordingNotifier::default();

        let _ = synchronize(&endpoint, &notifier, &SyncConfig::default(), &snapshot(&["1"]), 1).await;
        assert_eq!(endpoint.sent.borrow().len(), 1);
        assert_eq!(notifier.shown.borrow()[0].0, "Erro de conexão ao atualizar ordem");
    }

    #[test]
    fn test_sequence_is_monotonic() {
        let seq = SyncSequence::default();
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
        assert_eq!(seq.next(), 3);
    }
}
