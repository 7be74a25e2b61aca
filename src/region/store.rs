//! Concurrency-safe region storage.
//!
//! # Responsibilities
//! - Map client keys to regions, creating them on first registration
//! - Serialize mutation and lookup within a region
//! - Keep unrelated regions independent
//!
//! # Design Decisions
//! - DashMap shards guard the region set; a RwLock per region guards its table
//! - Lock order is always map shard → region lock
//! - Registration runs while the map entry is held, so a concurrent
//!   `remove_region` can never strand a route in a detached region

use std::sync::RwLock;

use dashmap::DashMap;

use crate::admin::AdminOp;
use crate::observability::metrics;
use crate::routing::{Route, RouteTable};
use crate::script::Script;

/// An isolation domain owning exactly one route table.
#[derive(Debug, Default)]
pub struct Region {
    table: RwLock<RouteTable>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, method: &str, path: &str, script: Script) {
        self.table
            .write()
            .expect("region lock poisoned")
            .register(method, path, script);
    }

    pub fn register_native(&self, method: &str, path: &str, op: AdminOp) {
        self.table
            .write()
            .expect("region lock poisoned")
            .register_native(method, path, op);
    }

    pub fn unregister(&self, method: &str, path: &str) -> bool {
        self.table
            .write()
            .expect("region lock poisoned")
            .unregister(method, path)
    }

    pub fn lookup(&self, method: &str, path: &str) -> Option<Route> {
        self.table
            .read()
            .expect("region lock poisoned")
            .lookup(method, path)
    }

    pub fn route_count(&self) -> usize {
        self.table.read().expect("region lock poisoned").len()
    }
}

/// All client regions, keyed by region key.
#[derive(Debug, Default)]
pub struct RegionStore {
    regions: DashMap<String, Region>,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scripted route, creating the region if needed.
    pub fn register(&self, key: &str, method: &str, path: &str, script: Script) {
        self.regions
            .entry(key.to_string())
            .or_default()
            .register(method, path, script);
        metrics::record_region_count(self.regions.len());
    }

    /// `None` if the region does not exist.
    pub fn unregister(&self, key: &str, method: &str, path: &str) -> Option<bool> {
        self.regions
            .get(key)
            .map(|region| region.unregister(method, path))
    }

    /// Drop a region and its whole table. Returns whether it existed.
    pub fn remove_region(&self, key: &str) -> bool {
        let removed = self.regions.remove(key).is_some();
        metrics::record_region_count(self.regions.len());
        removed
    }

    pub fn lookup(&self, key: &str, method: &str, path: &str) -> Option<Route> {
        self.regions.get(key)?.lookup(method, path)
    }

    /// Run `f` against an existing region. `None` if the region is absent.
    pub fn with_region<R>(&self, key: &str, f: impl FnOnce(&Region) -> R) -> Option<R> {
        self.regions.get(key).map(|region| f(&region))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.regions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn script(text: &str) -> Script {
        Script::parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn regions_are_created_lazily() {
        let store = RegionStore::new();
        assert!(!store.contains("a"));
        assert_eq!(store.unregister("a", "GET", "/x"), None);

        store.register("a", "GET", "/x", Script::default());
        assert!(store.contains("a"));
        assert!(store.lookup("a", "GET", "/x").is_some());
    }

    #[test]
    fn regions_are_isolated() {
        let store = RegionStore::new();
        store.register("a", "GET", "/x", script("res_body from-a"));
        store.register("b", "GET", "/x", script("res_body from-b"));

        let body = |key: &str| match store.lookup(key, "GET", "/x") {
            Some(Route::Scripted(route)) => route.script().render().body().clone(),
            _ => panic!("missing route"),
        };
        assert_eq!(&body("a")[..], b"from-a");
        assert_eq!(&body("b")[..], b"from-b");

        store.remove_region("a");
        assert!(store.lookup("a", "GET", "/x").is_none());
        assert!(store.lookup("b", "GET", "/x").is_some());
    }

    #[test]
    fn remove_region_is_a_no_op_when_absent() {
        let store = RegionStore::new();
        assert!(!store.remove_region("missing"));
        assert!(store.is_empty());
    }

    #[test]
    fn unregister_keeps_the_region() {
        let store = RegionStore::new();
        store.register("a", "GET", "/x", Script::default());

        assert_eq!(store.unregister("a", "GET", "/x"), Some(true));
        assert_eq!(store.unregister("a", "GET", "/x"), Some(false));
        assert!(store.contains("a"));
        assert_eq!(store.with_region("a", Region::route_count), Some(0));
    }

    #[test]
    fn concurrent_registration_loses_nothing() {
        let store = Arc::new(RegionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.register("shared", "GET", &format!("/{t}/{i}"), Script::default());
                        assert!(store.lookup("shared", "GET", &format!("/{t}/{i}")).is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.with_region("shared", Region::route_count), Some(400));
    }
}
