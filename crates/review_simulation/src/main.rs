use anyhow::{Context, Result};
use clap::Parser;
use review_simulation::auth::CognitoAuthenticator;
use review_simulation::cli::Cli;
use review_simulation::driver::run_simulation;
use review_simulation::http::HttpReviewPoster;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(profile) = &cli.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(region) = &cli.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    let aws_config = loader.load().await;

    let authenticator = CognitoAuthenticator::new(
        aws_sdk_cognitoidentityprovider::Client::new(&aws_config),
        cli.pool.clone(),
    );
    let http_client = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;
    let poster = HttpReviewPoster::new(http_client, cli.url.clone());

    let report = run_simulation(&cli.settings(), &authenticator, &poster)
        .with_context(|| format!("simulation against {} aborted", cli.url))?;

    if report.failed > 0 {
        tracing::warn!(
            failed = report.failed,
            sent = report.sent,
            "some reviews were not accepted"
        );
    }
    Ok(())
}
