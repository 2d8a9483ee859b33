//! Traffic generator for the review API.
//!
//! Authenticates a test user once, then posts one review per input line,
//! strictly in file order. Service adapters sit behind the `Authenticator` and
//! `ReviewPoster` traits so the run loop can be exercised without AWS.

pub mod auth;
pub mod cli;
pub mod driver;
pub mod http;
pub mod reviews;

use std::future::Future;

pub(crate) fn block_on_client<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
