use thiserror::Error;

pub const STREAM_NAME_VAR: &str = "STREAM_NAME";
pub const STREAM_BATCH_SIZE_VAR: &str = "STREAM_BATCH_SIZE";
pub const MAX_BATCH_SIZE_VAR: &str = "MAX_BATCH_SIZE";

pub const DEFAULT_STREAM_NAME: &str = "ReviewServiceDev-ReviewAnalysisStack-Stream";
pub const DEFAULT_STREAM_BATCH_SIZE: usize = 10;
pub const DEFAULT_MAX_BATCH_SIZE: usize = 25;

/// Upper bound of documents per Comprehend batch call.
pub const ANALYSIS_BATCH_LIMIT: usize = 25;
/// Upper bound of entries per Kinesis `PutRecords` call.
pub const STREAM_WRITE_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name}={value} is outside 1..={max}")]
    OutOfRange {
        name: &'static str,
        value: usize,
        max: usize,
    },
    #[error("STREAM_NAME must not be empty")]
    EmptyStreamName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub stream_name: String,
    pub stream_batch_size: usize,
    pub max_batch_size: usize,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            stream_name: DEFAULT_STREAM_NAME.to_string(),
            stream_batch_size: DEFAULT_STREAM_BATCH_SIZE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds and validates the config from an arbitrary variable source.
    /// Unset or blank variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let config = Self {
            stream_name: read(STREAM_NAME_VAR)
                .map(|value| value.trim().to_string())
                .unwrap_or_else(|| DEFAULT_STREAM_NAME.to_string()),
            stream_batch_size: parse_size(
                STREAM_BATCH_SIZE_VAR,
                read(STREAM_BATCH_SIZE_VAR),
                DEFAULT_STREAM_BATCH_SIZE,
            )?,
            max_batch_size: parse_size(
                MAX_BATCH_SIZE_VAR,
                read(MAX_BATCH_SIZE_VAR),
                DEFAULT_MAX_BATCH_SIZE,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stream_name.trim().is_empty() {
            return Err(ConfigError::EmptyStreamName);
        }
        check_range(
            STREAM_BATCH_SIZE_VAR,
            self.stream_batch_size,
            STREAM_WRITE_LIMIT,
        )?;
        check_range(
            MAX_BATCH_SIZE_VAR,
            self.max_batch_size,
            ANALYSIS_BATCH_LIMIT,
        )
    }
}

fn parse_size(
    name: &'static str,
    raw: Option<String>,
    default: usize,
) -> Result<usize, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let parsed = raw.trim().parse::<usize>();
    parsed.map_err(|_| ConfigError::InvalidNumber { name, value: raw })
}

fn check_range(name: &'static str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value == 0 || value > max {
        return Err(ConfigError::OutOfRange { name, value, max });
    }
    Ok(())
}
