//! Order Commands
//!
//! `fetch` binding for the order-update endpoint.

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::SyncError;
use crate::models::{OrderSnapshot, UpdateOrderRequest, UpdateOrderResponse};
use crate::sync::OrderEndpoint;

/// POSTs the full order as JSON to a fixed URL
pub struct HttpOrderEndpoint {
    url: String,
}

impl HttpOrderEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    fn build_request(&self, snapshot: &OrderSnapshot) -> Result<web_sys::Request, SyncError> {
        let body = serde_json::to_string(&UpdateOrderRequest { ids: snapshot })
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let headers = web_sys::Headers::new().map_err(js_transport)?;
        headers.set("Content-Type", "application/json").map_err(js_transport)?;
        headers.set("X-Requested-With", "XMLHttpRequest").map_err(js_transport)?;

        let init = web_sys::RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&body.into());

        web_sys::Request::new_with_str_and_init(&self.url, &init).map_err(js_transport)
    }
}

#[async_trait(?Send)]
impl OrderEndpoint for HttpOrderEndpoint {
    async fn update_order(&self, snapshot: &OrderSnapshot) -> Result<(), SyncError> {
        let window = web_sys::window().ok_or_else(|| SyncError::Transport("no window".into()))?;
        let request = self.build_request(snapshot)?;

        let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_transport)?
            .dyn_into()
            .map_err(js_transport)?;

        let status = response.status();
        let text = match response.text() {
            Ok(promise) => JsFuture::from(promise).await.ok().and_then(|v| v.as_string()),
            Err(_) => None,
        };
        let parsed = text.as_deref().map(serde_json::from_str::<UpdateOrderResponse>);

        interpret_reply(response.ok(), status, parsed)
    }
}

/// Map HTTP outcome plus decoded body to a sync result
fn interpret_reply(
    ok: bool,
    status: u16,
    body: Option<Result<UpdateOrderResponse, serde_json::Error>>,
) -> Result<(), SyncError> {
    if !ok {
        let reason = body.and_then(Result::ok).and_then(|b| b.failure_reason());
        return Err(SyncError::Status { status, reason });
    }
    match body {
        None => Err(SyncError::Decode("empty body".into())),
        Some(Err(e)) => Err(SyncError::Decode(e.to_string())),
        Some(Ok(reply)) if reply.succeeded() => Ok(()),
        Some(Ok(reply)) => Err(SyncError::Rejected(
            reply.failure_reason().unwrap_or_else(|| "motivo não informado".to_string()),
        )),
    }
}

fn js_transport(e: wasm_bindgen::JsValue) -> SyncError {
    SyncError::Transport(format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> Option<Result<UpdateOrderResponse, serde_json::Error>> {
        Some(serde_json::from_str(json))
    }

    #[test]
    fn test_success_flag() {
        assert_eq!(interpret_reply(true, 200, body(r#"{"success": true}"#)), Ok(()));
        assert_eq!(interpret_reply(true, 200, body(r#"{"sucesso": true}"#)), Ok(()));
    }

    #[test]
    fn test_success_under_both_spellings() {
        assert_eq!(interpret_reply(true, 200, body(r#"{"success": true, "sucesso": true}"#)), Ok(()));
    }

    #[test]
    fn test_explicit_failure_flag() {
        let result = interpret_reply(true, 200, body(r#"{"success": false, "error": "conflict"}"#));
        assert_eq!(result, Err(SyncError::Rejected("conflict".into())));
    }

    #[test]
    fn test_failure_status_with_partial_errors() {
        let result = interpret_reply(
            false,
            500,
            body(r#"{"sucesso": false, "erros": [{"id": "5", "erro": "bad gateway"}]}"#),
        );
        match result {
            Err(SyncError::Status { status: 500, reason: Some(reason) }) => assert!(reason.contains("5: bad gateway")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_failure_status_without_json() {
        let result = interpret_reply(false, 502, body("<html>Bad Gateway</html>"));
        assert_eq!(result, Err(SyncError::Status { status: 502, reason: None }));
    }

    #[test]
    fn test_ok_status_with_garbage_body() {
        assert!(matches!(interpret_reply(true, 200, body("nope")), Err(SyncError::Decode(_))));
        assert!(matches!(interpret_reply(true, 200, None), Err(SyncError::Decode(_))));
    }
}
