//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (task per connection, axum::serve)
//!     → server.rs (request id and trace layers)
//!     → dispatch: region resolver → route lookup
//!         miss → response.rs (404)
//!         hit  → request.rs (capture query/body, parse form)
//!              → history append (scripted routes)
//!              → admin handler | script render
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{CapturedRequest, FormFields, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
