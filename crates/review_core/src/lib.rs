//! Shared review pipeline domain primitives.
//!
//! This crate owns the review wire contract, handler configuration, result
//! correlation, and stream chunking. It intentionally excludes AWS SDK and
//! Lambda runtime concerns, which live in `review_lambda`.

pub mod chunking;
pub mod config;
pub mod contract;
pub mod enrichment;
pub mod events;
