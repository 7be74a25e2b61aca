//! Route-management operations served from the admin region.
//!
//! # Data Flow
//! ```text
//! POST <prefix>/<operation> (form body)
//!     → dispatch finds Route::Native(op) in the admin region
//!     → op.handle(store, caller's client key, form)
//!     → handlers.rs mutates / reads the caller's region
//!     → JSON envelope {status, msg} or {status, histroy}
//! ```
//!
//! # Status Codes
//! - 0: success (HTTP 200)
//! - 1: invalid parameter (HTTP 400)
//! - 2: route not exist (HTTP 400)
//! - 3: history not exist (HTTP 400)

pub mod handlers;
pub mod payload;

use axum::http::Method;
use axum::response::{IntoResponse, Response};

use crate::config::AdminConfig;
use crate::http::request::FormFields;
use crate::region::{Region, RegionStore};

pub use payload::{AdminError, HistoryItem, HistoryReply, StatusReply};

/// A native admin handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOp {
    Add,
    Remove,
    RemoveAll,
    History,
    ClearHistory,
}

impl AdminOp {
    pub const ALL: [AdminOp; 5] = [
        AdminOp::Add,
        AdminOp::Remove,
        AdminOp::RemoveAll,
        AdminOp::History,
        AdminOp::ClearHistory,
    ];

    /// Last path segment of the operation. The `histroy` spelling is part of
    /// the wire format.
    pub fn operation(self) -> &'static str {
        match self {
            AdminOp::Add => "add",
            AdminOp::Remove => "remove",
            AdminOp::RemoveAll => "removeAll",
            AdminOp::History => "histroy",
            AdminOp::ClearHistory => "clearHistroy",
        }
    }

    /// Run the operation against the caller's client region.
    pub fn handle(self, store: &RegionStore, target: &str, form: &FormFields) -> Response {
        let result = match self {
            AdminOp::Add => handlers::add(store, target, form),
            AdminOp::Remove => handlers::remove(store, target, form),
            AdminOp::RemoveAll => handlers::remove_all(store, target),
            AdminOp::History => handlers::history(store, target, form),
            AdminOp::ClearHistory => handlers::clear_history(store, target, form),
        };
        match result {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    operation = self.operation(),
                    region = %target,
                    status = err.status(),
                    error = %err,
                    "Admin operation rejected"
                );
                err.into_response()
            }
        }
    }
}

/// Build the fixed admin region: every operation as `POST <prefix>/<op>`.
pub fn admin_region(config: &AdminConfig) -> Region {
    let region = Region::new();
    for op in AdminOp::ALL {
        region.register_native(Method::POST.as_str(), &config.path_for(op.operation()), op);
    }
    region
}
