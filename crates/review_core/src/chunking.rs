use std::ops::Range;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkingError {
    #[error("stream batch size must be positive")]
    ZeroBatchSize,
}

/// A contiguous slice of enriched records sent in one stream write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamWrite {
    pub write_id: usize,
    pub start_index: usize,
    pub end_index_exclusive: usize,
}

impl StreamWrite {
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index_exclusive
    }

    pub fn len(&self) -> usize {
        self.end_index_exclusive - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `total_records` into writes of `batch_size` records, the last write
/// taking the remainder. Writes are contiguous and non-empty, and together
/// cover every record exactly once. No records means no writes.
pub fn plan_stream_writes(
    total_records: usize,
    batch_size: usize,
) -> Result<Vec<StreamWrite>, ChunkingError> {
    if batch_size == 0 {
        return Err(ChunkingError::ZeroBatchSize);
    }

    let write_count = total_records.div_ceil(batch_size);
    let mut writes = Vec::with_capacity(write_count);
    let mut cursor = 0usize;

    for write_id in 0..write_count {
        let end_index_exclusive = (cursor + batch_size).min(total_records);
        writes.push(StreamWrite {
            write_id,
            start_index: cursor,
            end_index_exclusive,
        });
        cursor = end_index_exclusive;
    }

    Ok(writes)
}
