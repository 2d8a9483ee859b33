use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRecord {
    pub partition_key: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("stream write to {stream} failed: {message}")]
    Service { stream: String, message: String },
    #[error("{failed} of {total} records were rejected by {stream}")]
    PartialFailure {
        stream: String,
        failed: usize,
        total: usize,
    },
    #[error("invalid stream record: {0}")]
    InvalidRecord(String),
}

pub trait RecordPublisher {
    /// Writes one chunk of records in a single stream call.
    fn put_records(&self, records: &[StreamRecord]) -> Result<(), PublishError>;
}
