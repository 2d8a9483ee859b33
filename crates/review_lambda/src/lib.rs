//! AWS-oriented adapters and handler for review analysis.
//!
//! This crate owns runtime integration details (the Lambda entry point and the
//! Comprehend and Kinesis adapters). Batch decoding, correlation and chunking
//! live in `review_core`.

pub mod adapters;
pub mod handlers;
pub mod logging;
