use std::future::Future;

pub mod analyzer;
pub mod comprehend;
pub mod kinesis;
pub mod publisher;

/// Drives an SDK future to completion from synchronous handler code. Requires
/// the multi-threaded runtime the Lambda binary starts.
pub(crate) fn block_on_sdk<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
