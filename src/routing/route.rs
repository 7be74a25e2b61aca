//! Route keys and route variants.

use std::fmt;
use std::sync::Arc;

use crate::admin::AdminOp;
use crate::history::{HistoryEntry, HistoryLog};
use crate::script::Script;

/// Exact lookup key, `METHOD@PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey(String);

impl RouteKey {
    pub fn new(method: &str, path: &str) -> Self {
        Self(format!("{method}@{path}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered binding.
#[derive(Debug, Clone)]
pub enum Route {
    /// Admin operation handled in-process. Keeps no history.
    Native(AdminOp),
    /// Client mock replayed from a script.
    Scripted(Arc<ScriptedRoute>),
}

/// A client route: its script and everything it has served.
#[derive(Debug)]
pub struct ScriptedRoute {
    method: String,
    path: String,
    script: Script,
    history: HistoryLog,
}

impl ScriptedRoute {
    pub fn new(method: impl Into<String>, path: impl Into<String>, script: Script) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            script,
            history: HistoryLog::new(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn record(&self, entry: HistoryEntry) {
        self.history.append(entry);
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.list()
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }
}
