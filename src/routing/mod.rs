//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path) + region key
//!     → region store selects the region's RouteTable
//!     → table.rs (exact lookup by "METHOD@PATH")
//!     → Return: matched Route or None
//! ```
//!
//! # Design Decisions
//! - Exact match only: case-sensitive, no normalization, no wildcards
//! - Last registration for a key wins
//! - Route is a tagged variant: native admin handler | script + history

pub mod route;
pub mod table;

pub use route::{Route, RouteKey, ScriptedRoute};
pub use table::RouteTable;
