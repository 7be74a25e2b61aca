//! Per-region route table.
//!
//! # Responsibilities
//! - Store routes by exact `METHOD@PATH` key
//! - Insert-or-overwrite, idempotent removal, lookup
//!
//! # Design Decisions
//! - Not synchronized itself; the owning region guards it with a lock
//! - Lookup hands out a cheap clone (routes are `Arc`-backed) so the lock
//!   is released before history capture or rendering

use std::collections::HashMap;
use std::sync::Arc;

use crate::admin::AdminOp;
use crate::routing::route::{Route, RouteKey, ScriptedRoute};
use crate::script::Script;

#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<RouteKey, Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a scripted route. Replacing drops the old history.
    pub fn register(&mut self, method: &str, path: &str, script: Script) {
        let route = ScriptedRoute::new(method, path, script);
        self.routes
            .insert(RouteKey::new(method, path), Route::Scripted(Arc::new(route)));
    }

    /// Insert or replace a native admin route.
    pub fn register_native(&mut self, method: &str, path: &str, op: AdminOp) {
        self.routes.insert(RouteKey::new(method, path), Route::Native(op));
    }

    /// Remove a route; absent keys are a no-op.
    pub fn unregister(&mut self, method: &str, path: &str) -> bool {
        self.routes.remove(&RouteKey::new(method, path)).is_some()
    }

    pub fn lookup(&self, method: &str, path: &str) -> Option<Route> {
        self.routes.get(&RouteKey::new(method, path)).cloned()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
