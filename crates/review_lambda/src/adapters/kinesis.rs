use aws_sdk_kinesis::error::DisplayErrorContext;
use aws_sdk_kinesis::primitives::Blob;
use aws_sdk_kinesis::types::PutRecordsRequestEntry;

use super::block_on_sdk;
use super::publisher::{PublishError, RecordPublisher, StreamRecord};

pub struct KinesisPublisher {
    client: aws_sdk_kinesis::Client,
    stream_name: String,
}

impl KinesisPublisher {
    pub fn new(client: aws_sdk_kinesis::Client, stream_name: impl Into<String>) -> Self {
        Self {
            client,
            stream_name: stream_name.into(),
        }
    }
}

impl RecordPublisher for KinesisPublisher {
    fn put_records(&self, records: &[StreamRecord]) -> Result<(), PublishError> {
        let entries = records
            .iter()
            .map(|record| {
                PutRecordsRequestEntry::builder()
                    .data(Blob::new(record.data.clone()))
                    .partition_key(record.partition_key.clone())
                    .build()
                    .map_err(|error| PublishError::InvalidRecord(error.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request = self
            .client
            .put_records()
            .stream_name(self.stream_name.clone())
            .set_records(Some(entries));

        let output = block_on_sdk(request.send()).map_err(|error| PublishError::Service {
            stream: self.stream_name.clone(),
            message: DisplayErrorContext(&error).to_string(),
        })?;

        check_failed_records(&self.stream_name, output.failed_record_count(), records.len())
    }
}

/// `PutRecords` succeeds at the call level even when some entries are
/// throttled; those show up only in `FailedRecordCount`.
fn check_failed_records(
    stream: &str,
    failed_record_count: Option<i32>,
    total: usize,
) -> Result<(), PublishError> {
    let failed = failed_record_count
        .and_then(|count| usize::try_from(count).ok())
        .unwrap_or(0);
    if failed > 0 {
        return Err(PublishError::PartialFailure {
            stream: stream.to_string(),
            failed,
            total,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_record_count_is_a_partial_failure() {
        let error = check_failed_records("review-stream", Some(2), 5)
            .expect_err("rejected entries should fail the write");
        assert_eq!(
            error,
            PublishError::PartialFailure {
                stream: "review-stream".to_string(),
                failed: 2,
                total: 5,
            }
        );
    }

    #[test]
    fn zero_or_missing_failed_count_is_success() {
        assert!(check_failed_records("review-stream", Some(0), 3).is_ok());
        assert!(check_failed_records("review-stream", None, 3).is_ok());
    }
}
