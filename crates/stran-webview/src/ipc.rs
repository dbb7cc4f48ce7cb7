//! IPC protocol between Rust and the scripts running in a WebView.
//!
//! - **JS -> Rust**: `window.stran.ipc.send(kind, payload)` posts
//!   `{"kind": ..., "payload": ...}` through `window.ipc.postMessage`.
//! - **Rust -> JS**: `evaluate_script` runs the snippets built here, which
//!   either call `window.stran.ipc._dispatch(kind, payload)` or fire a
//!   `CustomEvent` on `window`.

use serde::{Deserialize, Serialize};

/// A typed IPC message from JavaScript to Rust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / command name.
    pub kind: String,
    #[serde(default = "IpcPayload::none")]
    pub payload: IpcPayload,
}

/// Payload of an IPC message: a plain string or structured JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    None,
}

impl IpcPayload {
    fn none() -> Self {
        IpcPayload::None
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            IpcPayload::Text(s) => Some(s),
            IpcPayload::Json(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        match self {
            IpcPayload::Json(v) => v.get(key),
            _ => None,
        }
    }
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Text(text.into()),
        }
    }
}

/// What a page script asked of its tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    /// `translator.translate(text)`; the reply must carry `call`.
    Translate { call: u64, text: String },
    /// The page called `window.close()`.
    Close,
}

impl ContentRequest {
    /// Interpret a message posted by a content page. Unknown kinds and
    /// malformed payloads yield `None`.
    pub fn from_message(msg: &IpcMessage) -> Option<Self> {
        match msg.kind.as_str() {
            "translate" => {
                let call = msg.payload.get("call")?.as_u64()?;
                let text = msg
                    .payload
                    .get("text")
                    .and_then(|t| t.as_str())
                    .unwrap_or_default()
                    .to_string();
                Some(ContentRequest::Translate { call, text })
            }
            "close_request" => Some(ContentRequest::Close),
            _ => None,
        }
    }
}

/// Sets up `window.stran.ipc` and routes `window.close()` through it.
/// Installed before every other script.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.stran = window.stran || {};
    window.stran.ipc = {
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload === undefined ? null : payload
            }));
        },
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };
    window.close = function() {
        window.stran.ipc.send('close_request', null);
    };
})();
"#;

/// Generate a JS snippet that dispatches a message to the JS IPC handler.
pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.stran && window.stran.ipc._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}

/// Generate a JS snippet that fires `new CustomEvent(name, {detail})` on
/// `window`. `detail_json` must already be a JSON document.
pub fn js_custom_event(name: &str, detail_json: &str) -> String {
    format!(
        "window.dispatchEvent(new CustomEvent({}, {{ detail: {} }}));",
        serde_json::to_string(name).unwrap_or_else(|_| "\"unknown\"".to_string()),
        detail_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_translate_request() {
        let msg = IpcMessage::from_json(
            r#"{"kind":"translate","payload":{"call":7,"text":"Hello"}}"#,
        )
        .unwrap();
        assert_eq!(
            ContentRequest::from_message(&msg),
            Some(ContentRequest::Translate {
                call: 7,
                text: "Hello".into()
            })
        );
    }

    #[test]
    fn translate_without_text_is_empty_text() {
        let msg = IpcMessage::from_json(r#"{"kind":"translate","payload":{"call":1}}"#).unwrap();
        assert_eq!(
            ContentRequest::from_message(&msg),
            Some(ContentRequest::Translate {
                call: 1,
                text: String::new()
            })
        );
    }

    #[test]
    fn translate_without_call_id_is_ignored() {
        let msg =
            IpcMessage::from_json(r#"{"kind":"translate","payload":{"text":"x"}}"#).unwrap();
        assert_eq!(ContentRequest::from_message(&msg), None);
    }

    #[test]
    fn close_request_and_unknown_kinds() {
        let close = IpcMessage::from_json(r#"{"kind":"close_request","payload":null}"#).unwrap();
        assert_eq!(ContentRequest::from_message(&close), Some(ContentRequest::Close));

        let other = IpcMessage::text("ping", "x");
        assert_eq!(ContentRequest::from_message(&other), None);
    }

    #[test]
    fn missing_payload_defaults_to_none() {
        let msg = IpcMessage::from_json(r#"{"kind":"reload"}"#).unwrap();
        assert!(matches!(msg.payload, IpcPayload::None));
    }

    #[test]
    fn text_payload_accessor() {
        let msg = IpcMessage::text("navigate", "example.com");
        assert_eq!(msg.payload.as_text(), Some("example.com"));
        assert!(msg.payload.get("call").is_none());
    }

    #[test]
    fn dispatch_snippet_escapes_kind_and_payload() {
        let js = js_dispatch_message("bridge_reply", &serde_json::json!({"call": 3}));
        assert_eq!(
            js,
            r#"window.stran && window.stran.ipc._dispatch("bridge_reply", {"call":3});"#
        );
    }

    #[test]
    fn custom_event_snippet() {
        let js = js_custom_event("translationStateChanged", r#"{"enabled":true}"#);
        assert_eq!(
            js,
            r#"window.dispatchEvent(new CustomEvent("translationStateChanged", { detail: {"enabled":true} }));"#
        );
    }
}
