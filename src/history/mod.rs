//! Request history capture.
//!
//! # Responsibilities
//! - Snapshot the raw query and body of every request a scripted route serves
//! - Hand out ordered, point-in-time copies for the admin history call
//! - Produce the bounded body preview used in log lines
//!
//! # Design Decisions
//! - Append-only; `clear` is the only operation that shrinks a log
//! - No eviction: storage is unbounded, only the log preview is capped
//! - One mutex per route, so appends on unrelated routes never contend

use std::sync::Mutex;

use axum::body::Bytes;

/// Placeholder logged instead of bodies above the preview threshold.
pub const BODY_TOO_BIG: &str = "body too big";

/// One matched request, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub query_raw: String,
    pub body_raw: Bytes,
}

impl HistoryEntry {
    pub fn new(query_raw: impl Into<String>, body_raw: impl Into<Bytes>) -> Self {
        Self {
            query_raw: query_raw.into(),
            body_raw: body_raw.into(),
        }
    }
}

/// Arrival-ordered history of one route.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, entry: HistoryEntry) {
        self.entries
            .lock()
            .expect("history mutex poisoned")
            .push(entry);
        crate::observability::metrics::record_history_entry();
    }

    /// Copy of the entries at call time.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.lock().expect("history mutex poisoned").clone()
    }

    /// Replace the history with an empty one.
    pub fn clear(&self) {
        *self.entries.lock().expect("history mutex poisoned") = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("history mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Body text for log lines: the body itself up to `limit` bytes, else a placeholder.
pub fn preview(body: &[u8], limit: usize) -> String {
    if body.len() <= limit {
        String::from_utf8_lossy(body).into_owned()
    } else {
        BODY_TOO_BIG.to_string()
    }
}
