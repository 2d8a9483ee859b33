use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::driver::SimulationSettings;

#[derive(Parser, Debug)]
#[command(
    name = "review_simulation",
    about = "Replay review text against the review API as an authenticated test user",
    long_about = "Signs in to the Cognito user pool with USER_PASSWORD_AUTH, then posts one\n\
                  review per line of the input file to the review endpoint, in file order."
)]
pub struct Cli {
    /// AWS credentials profile used for the sign-in call
    #[arg(long, env = "REVIEW_SIM_PROFILE")]
    pub profile: Option<String>,
    /// AWS region of the user pool (defaults to the profile's region)
    #[arg(long, env = "REVIEW_SIM_REGION")]
    pub region: Option<String>,
    /// Review endpoint: API Gateway URL + /review
    #[arg(long, env = "REVIEW_SIM_URL")]
    pub url: Url,
    /// Cognito user pool app client id
    #[arg(long, env = "REVIEW_SIM_POOL")]
    pub pool: String,
    /// Test user name
    #[arg(long = "id", env = "REVIEW_SIM_USER")]
    pub username: String,
    /// Test user password
    #[arg(long = "pw", env = "REVIEW_SIM_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Text file with one review per line
    #[arg(long, env = "REVIEW_SIM_FILE", default_value = "data/reviews.txt")]
    pub file: PathBuf,
    /// Send at most this many reviews
    #[arg(long, env = "REVIEW_SIM_COUNT")]
    pub count: Option<usize>,
    /// Pause between requests in milliseconds
    #[arg(long, env = "REVIEW_SIM_DELAY_MS", default_value_t = 0)]
    pub delay_ms: u64,
}

impl Cli {
    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            username: self.username.clone(),
            password: self.password.clone(),
            input: self.file.clone(),
            limit: self.count,
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_documented_invocation() {
        let cli = Cli::try_parse_from([
            "review_simulation",
            "--profile",
            "dev",
            "--url",
            "https://abc.execute-api.us-east-1.amazonaws.com/prod/review",
            "--pool",
            "client-123",
            "--id",
            "tester",
            "--pw",
            "Secret#1",
        ])
        .expect("documented flags should parse");

        assert_eq!(cli.profile.as_deref(), Some("dev"));
        assert_eq!(cli.url.path(), "/prod/review");
        assert_eq!(cli.file, PathBuf::from("data/reviews.txt"));

        let settings = cli.settings();
        assert_eq!(settings.username, "tester");
        assert_eq!(settings.limit, None);
        assert_eq!(settings.delay, Duration::ZERO);
    }

    #[test]
    fn reads_limit_and_delay() {
        let cli = Cli::try_parse_from([
            "review_simulation",
            "--url",
            "http://localhost:3000/review",
            "--pool",
            "client-123",
            "--id",
            "tester",
            "--pw",
            "pw",
            "--file",
            "reviews.txt",
            "--count",
            "5",
            "--delay-ms",
            "250",
        ])
        .expect("flags should parse");

        let settings = cli.settings();
        assert_eq!(settings.limit, Some(5));
        assert_eq!(settings.delay, Duration::from_millis(250));
        assert_eq!(settings.input, PathBuf::from("reviews.txt"));
    }

    #[test]
    fn rejects_malformed_url() {
        let error = Cli::try_parse_from([
            "review_simulation",
            "--url",
            "not a url",
            "--pool",
            "client-123",
            "--id",
            "tester",
            "--pw",
            "pw",
        ])
        .expect_err("bad url should fail");
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
