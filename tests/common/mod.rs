//! Recording doubles for the transport and the view.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sheetsync::api::Transport;
use sheetsync::view::{Field, View};
use sheetsync::TransportError;

/// Everything observable, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Post { url: String, body: String },
    Get { url: String, query: Vec<(String, String)> },
    Button(bool),
    Table(Vec<Vec<String>>),
    Message { text: String, is_error: bool },
    Log { text: String, is_error: bool },
}

pub type Journal = Arc<Mutex<Vec<Event>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(journal: &Journal) -> Vec<Event> {
    journal.lock().unwrap().clone()
}

pub struct MockTransport {
    journal: Journal,
    post_replies: Mutex<VecDeque<Result<String, TransportError>>>,
    get_replies: Mutex<VecDeque<Result<String, TransportError>>>,
}

impl MockTransport {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            post_replies: Mutex::new(VecDeque::new()),
            get_replies: Mutex::new(VecDeque::new()),
        }
    }

    pub fn reply_to_post(self, reply: Result<&str, TransportError>) -> Self {
        self.post_replies.lock().unwrap().push_back(reply.map(str::to_string));
        self
    }

    pub fn reply_to_get(self, reply: Result<&str, TransportError>) -> Self {
        self.get_replies.lock().unwrap().push_back(reply.map(str::to_string));
        self
    }
}

fn next_reply(queue: &Mutex<VecDeque<Result<String, TransportError>>>) -> Result<String, TransportError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(TransportError::Request("no reply queued".into())))
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, url: &str, body: String) -> Result<String, TransportError> {
        self.journal.lock().unwrap().push(Event::Post {
            url: url.to_string(),
            body,
        });
        next_reply(&self.post_replies)
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        self.journal.lock().unwrap().push(Event::Get {
            url: url.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        });
        next_reply(&self.get_replies)
    }
}

pub struct RecordingView {
    journal: Journal,
    fields: Mutex<HashMap<Field, String>>,
    key_edit_during_write: Option<String>,
}

impl RecordingView {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            fields: Mutex::new(HashMap::new()),
            key_edit_during_write: None,
        }
    }

    /// Overwrite the key field when the submit control is disabled, as a
    /// user typing while the write is in flight would.
    pub fn edit_key_during_write(mut self, value: &str) -> Self {
        self.key_edit_during_write = Some(value.to_string());
        self
    }

    pub fn with_field(self, field: Field, value: &str) -> Self {
        self.fields.lock().unwrap().insert(field, value.to_string());
        self
    }
}

impl View for RecordingView {
    fn get_field(&self, field: Field) -> String {
        self.fields.lock().unwrap().get(&field).cloned().unwrap_or_default()
    }

    fn set_field(&self, field: Field, value: &str) {
        self.fields.lock().unwrap().insert(field, value.to_string());
    }

    fn set_button_state(&self, pending: bool) {
        if let (true, Some(key)) = (pending, &self.key_edit_during_write) {
            self.fields.lock().unwrap().insert(Field::Key, key.clone());
        }
        self.journal.lock().unwrap().push(Event::Button(pending));
    }

    fn render_table(&self, rows: &[Vec<String>]) {
        self.journal.lock().unwrap().push(Event::Table(rows.to_vec()));
    }

    fn render_message(&self, text: &str, is_error: bool) {
        self.journal.lock().unwrap().push(Event::Message {
            text: text.to_string(),
            is_error,
        });
    }

    fn append_log(&self, text: &str, is_error: bool) {
        self.journal.lock().unwrap().push(Event::Log {
            text: text.to_string(),
            is_error,
        });
    }
}

pub fn requests(events: &[Event]) -> Vec<&Event> {
    events
        .iter()
        .filter(|e| matches!(e, Event::Post { .. } | Event::Get { .. }))
        .collect()
}

pub fn without_logs(events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|e| !matches!(e, Event::Log { .. }))
        .cloned()
        .collect()
}

pub const URL: &str = "https://script.example.test/exec";
pub const TABLE_REPLY: &str = r#"{"status":"success","data":[["Name","Role"],["Alice","Admin"]]}"#;
