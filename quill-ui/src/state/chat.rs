//! Chat Connection
//!
//! WebSocket client behind the chat widget. Frames are JSON objects tagged
//! by `type`. The transcript keeps only the most recent messages.

use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

/// Messages kept in the transcript
pub const MAX_MESSAGES: usize = 100;

const MAX_RECONNECT_ATTEMPTS: u32 = 5;

const CHAT_URL_KEY: &str = "quill_chat_url";

/// Frames sent by the chat server
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Message {
        author: String,
        body: String,
        #[serde(default)]
        sent_at: Option<i64>,
    },
    Joined {
        username: String,
    },
    Left {
        username: String,
    },
    Error {
        message: String,
    },
}

/// Frames sent to the chat server
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    Message { author: String, body: String },
}

/// One line in the transcript. `author` is `None` for notices.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub author: Option<String>,
    pub body: String,
    pub sent_at: i64,
}

impl ChatMessage {
    pub fn time_label(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.sent_at)
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Turn a server frame into a transcript line
pub fn frame_to_message(frame: ServerFrame, now: i64) -> ChatMessage {
    match frame {
        ServerFrame::Message { author, body, sent_at } => ChatMessage {
            author: Some(author),
            body,
            sent_at: sent_at.unwrap_or(now),
        },
        ServerFrame::Joined { username } => ChatMessage {
            author: None,
            body: format!("{} joined", username),
            sent_at: now,
        },
        ServerFrame::Left { username } => ChatMessage {
            author: None,
            body: format!("{} left", username),
            sent_at: now,
        },
        ServerFrame::Error { message } => ChatMessage {
            author: None,
            body: format!("Error: {}", message),
            sent_at: now,
        },
    }
}

/// Append, dropping the oldest lines beyond `cap`
pub fn push_bounded(log: &mut Vec<ChatMessage>, message: ChatMessage, cap: usize) {
    log.push(message);
    if log.len() > cap {
        let excess = log.len() - cap;
        log.drain(..excess);
    }
}

/// Reconnect delay: 1s, 2s, 4s ... capped at 30s
pub fn backoff_delay_ms(attempt: u32) -> u32 {
    2_u32.saturating_pow(attempt).saturating_mul(1000).min(30_000)
}

/// `http(s)://host/...` to `ws(s)://host/.../ws/chat/`
pub fn derive_chat_url(api_base: &str) -> String {
    let ws_base = api_base
        .trim_end_matches('/')
        .replacen("https://", "wss://", 1)
        .replacen("http://", "ws://", 1);
    format!("{}/ws/chat/", ws_base)
}

/// Chat URL override from local storage, else derived from the API base
pub fn get_chat_url(api_base: &str) -> String {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CHAT_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| derive_chat_url(api_base))
}

pub fn set_chat_url(url: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let url = url.trim();
        let result = if url.is_empty() {
            storage.remove_item(CHAT_URL_KEY)
        } else {
            storage.set_item(CHAT_URL_KEY, url)
        };
        if let Err(e) = result {
            web_sys::console::error_1(&e);
        }
    }
}

/// Reactive chat state for the widget
#[derive(Clone, Copy)]
pub struct ChatState {
    pub messages: RwSignal<Vec<ChatMessage>>,
    pub connected: RwSignal<bool>,
    pub open: RwSignal<bool>,
    pub unread: RwSignal<usize>,
}

impl ChatState {
    fn new() -> Self {
        Self {
            messages: create_rw_signal(Vec::new()),
            connected: create_rw_signal(false),
            open: create_rw_signal(false),
            unread: create_rw_signal(0),
        }
    }

    fn push(&self, message: ChatMessage) {
        self.messages
            .update(|log| push_bounded(log, message, MAX_MESSAGES));
        if !self.open.get_untracked() {
            self.unread.update(|n| *n += 1);
        }
    }
}

/// WebSocket client for the chat widget
#[derive(Clone)]
pub struct ChatClient {
    ws: Rc<RefCell<Option<WebSocket>>>,
    url: String,
    reconnect_attempts: Rc<Cell<u32>>,
    state: ChatState,
}

impl ChatClient {
    fn new(url: &str, state: ChatState) -> Self {
        Self {
            ws: Rc::new(RefCell::new(None)),
            url: url.to_string(),
            reconnect_attempts: Rc::new(Cell::new(0)),
            state,
        }
    }

    /// Connect to the chat server
    pub fn connect(&self) {
        match WebSocket::new(&self.url) {
            Ok(ws) => {
                self.setup_handlers(&ws);
                *self.ws.borrow_mut() = Some(ws);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Chat connection failed: {:?}", e).into());
                self.schedule_reconnect();
            }
        }
    }

    fn setup_handlers(&self, ws: &WebSocket) {
        // On open
        let client = self.clone();
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"Chat connected".into());
            client.state.connected.set(true);
            client.reconnect_attempts.set(0);
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        // On message
        let state = self.state;
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text: String = text.into();
                handle_frame(&text, &state);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        // On close
        let client = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!("Chat closed: code={}, reason={}", event.code(), event.reason()).into(),
            );
            client.state.connected.set(false);
            client.schedule_reconnect();
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        // On error
        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            web_sys::console::error_1(&format!("Chat error: {:?}", e).into());
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    fn schedule_reconnect(&self) {
        let attempts = self.reconnect_attempts.get();
        if attempts >= MAX_RECONNECT_ATTEMPTS {
            web_sys::console::error_1(&"Chat: max reconnect attempts reached".into());
            return;
        }
        self.reconnect_attempts.set(attempts + 1);

        let client = self.clone();
        gloo_timers::callback::Timeout::new(backoff_delay_ms(attempts), move || {
            web_sys::console::log_1(
                &format!("Chat reconnect (attempt {})", client.reconnect_attempts.get()).into(),
            );
            client.connect();
        })
        .forget();
    }

    /// Send a chat line
    pub fn send(&self, author: &str, body: &str) -> Result<(), String> {
        let ws_guard = self.ws.borrow();
        let ws = ws_guard
            .as_ref()
            .filter(|ws| ws.ready_state() == WebSocket::OPEN)
            .ok_or("Chat is not connected")?;

        let frame = ClientFrame::Message {
            author: author.to_string(),
            body: body.to_string(),
        };
        let json = serde_json::to_string(&frame).map_err(|e| e.to_string())?;
        ws.send_with_str(&json).map_err(|e| format!("{:?}", e))
    }
}

/// Handle an incoming frame
fn handle_frame(text: &str, state: &ChatState) {
    match serde_json::from_str::<ServerFrame>(text) {
        Ok(frame) => {
            let now = chrono::Utc::now().timestamp_millis();
            state.push(frame_to_message(frame, now));
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to parse chat frame: {}", e).into());
        }
    }
}

/// Connect the chat and provide `ChatState` and `ChatClient` (call from app root)
pub fn init_chat(api_base: &str) {
    let state = ChatState::new();
    let client = ChatClient::new(&get_chat_url(api_base), state);
    client.connect();

    provide_context(state);
    provide_context(client);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(body: &str) -> ChatMessage {
        ChatMessage {
            author: Some("ann".to_string()),
            body: body.to_string(),
            sent_at: 0,
        }
    }

    #[test]
    fn test_push_bounded_drops_oldest() {
        let mut log = Vec::new();
        for i in 0..5 {
            push_bounded(&mut log, line(&i.to_string()), 3);
        }

        let bodies: Vec<&str> = log.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_decode_frames() {
        let msg: ServerFrame =
            serde_json::from_str(r#"{"type": "message", "author": "ann", "body": "hi", "sent_at": 5}"#)
                .unwrap();
        assert_eq!(
            frame_to_message(msg, 99),
            ChatMessage {
                author: Some("ann".to_string()),
                body: "hi".to_string(),
                sent_at: 5
            }
        );

        let joined: ServerFrame = serde_json::from_str(r#"{"type": "joined", "username": "bob"}"#).unwrap();
        let notice = frame_to_message(joined, 99);
        assert_eq!(notice.author, None);
        assert_eq!(notice.body, "bob joined");
        assert_eq!(notice.sent_at, 99);
    }

    #[test]
    fn test_unknown_frame_rejected() {
        assert!(serde_json::from_str::<ServerFrame>(r#"{"type": "typing"}"#).is_err());
    }

    #[test]
    fn test_client_frame_shape() {
        let frame = ClientFrame::Message {
            author: "ann".to_string(),
            body: "hello".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            serde_json::json!({"type": "message", "author": "ann", "body": "hello"})
        );
    }

    #[test]
    fn test_backoff() {
        assert_eq!(backoff_delay_ms(0), 1000);
        assert_eq!(backoff_delay_ms(3), 8000);
        assert_eq!(backoff_delay_ms(10), 30_000);
    }

    #[test]
    fn test_derive_chat_url() {
        assert_eq!(
            derive_chat_url("https://blog.example.com"),
            "wss://blog.example.com/ws/chat/"
        );
        assert_eq!(
            derive_chat_url("http://localhost:8000/"),
            "ws://localhost:8000/ws/chat/"
        );
    }
}
