//! Multi-tenant HTTP mock server library.

pub mod admin;
pub mod config;
pub mod history;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod region;
pub mod routing;
pub mod script;

pub use config::schema::MockConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
