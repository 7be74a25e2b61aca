//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → MockConfig (validated, immutable)
//!     → copied into the subsystems that need it at startup
//! ```
//!
//! # Design Decisions
//! - Every field has a default so an empty file (or no file) is valid
//! - Validation separates syntactic (serde) from semantic checks
//! - No hot reload: mock state lives in memory and a restart wipes it anyway

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AdminConfig;
pub use schema::HistoryConfig;
pub use schema::ListenerConfig;
pub use schema::MockConfig;
pub use schema::ObservabilityConfig;
pub use schema::RegionConfig;
