//! Client isolation ("regions").
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, headers, peer address)
//!     → resolver.rs
//!         path under admin prefix  → RegionTarget::Admin
//!         identity header set      → RegionTarget::Client(header value)
//!         otherwise                → RegionTarget::Client(peer address sans port)
//!     → store.rs (region key → Region → RouteTable)
//! ```
//!
//! # Design Decisions
//! - The admin region lives outside the client map, so no client key can reach it
//! - Client regions are created lazily by the first registration
//! - One RwLock per region; the region map itself is a sharded DashMap

pub mod resolver;
pub mod store;

pub use resolver::{RegionResolver, RegionTarget};
pub use store::{Region, RegionStore};
