//! BETBOOK — Personal sports betting ledger and dashboard backend
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod api;
pub mod config;
pub mod export;
pub mod metrics;
pub mod settlement;
pub mod storage;
pub mod types;
