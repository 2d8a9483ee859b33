use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use review_core::contract::ReviewRequest;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::{AuthError, Authenticator};
use crate::http::ReviewPoster;
use crate::reviews::{read_review_lines, ReviewFileError};

const COMPONENT: &str = "simulation_driver";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSettings {
    pub username: String,
    pub password: String,
    pub input: PathBuf,
    pub limit: Option<usize>,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub sent: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Failures that end a run. Individual request failures never do.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Input(#[from] ReviewFileError),
}

/// Signs in, then posts every review line in order with the one token.
pub fn run_simulation(
    settings: &SimulationSettings,
    authenticator: &impl Authenticator,
    poster: &impl ReviewPoster,
) -> Result<RunReport, DriverError> {
    let token = authenticator.authenticate(&settings.username, &settings.password)?;
    info!(
        component = COMPONENT,
        event = "authenticated",
        username = %settings.username
    );

    let reviews = read_review_lines(&settings.input, settings.limit)?;
    info!(
        component = COMPONENT,
        event = "reviews_loaded",
        path = %settings.input.display(),
        reviews = reviews.len()
    );

    let mut report = RunReport::default();
    for (index, review) in reviews.into_iter().enumerate() {
        if index > 0 && !settings.delay.is_zero() {
            thread::sleep(settings.delay);
        }

        let request = ReviewRequest::write(review);
        report.sent += 1;
        match poster.post_review(&token, &request) {
            Ok(outcome) if outcome.is_success() => {
                report.succeeded += 1;
                info!(
                    component = COMPONENT,
                    event = "review_posted",
                    index,
                    status = outcome.status,
                    body = %outcome.body
                );
            }
            Ok(outcome) => {
                report.failed += 1;
                warn!(
                    component = COMPONENT,
                    event = "review_rejected",
                    index,
                    status = outcome.status,
                    body = %outcome.body
                );
            }
            Err(error) => {
                report.failed += 1;
                warn!(
                    component = COMPONENT,
                    event = "review_post_failed",
                    index,
                    error = %error
                );
            }
        }
    }

    info!(
        component = COMPONENT,
        event = "run_completed",
        sent = report.sent,
        succeeded = report.succeeded,
        failed = report.failed
    );
    Ok(report)
}
