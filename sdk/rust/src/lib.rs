//! Client for the mock server's admin surface.

pub mod client;

pub use client::{HistoryRecord, MockClient, SdkError};
