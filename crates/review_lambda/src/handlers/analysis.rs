use review_core::chunking::{plan_stream_writes, ChunkingError};
use review_core::config::HandlerConfig;
use review_core::contract::{
    BatchStatus, EnrichedRecord, HandlerSummary, IndexedEntities, IndexedSyntax,
    HANDLER_SCHEMA_VERSION,
};
use review_core::enrichment::{enrich_batch, EnrichmentError};
use review_core::events::{decode_review_batch, ensure_batch_size, is_stream_event, EventError};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::adapters::analyzer::{AnalysisError, TextAnalyzer};
use crate::adapters::publisher::{PublishError, RecordPublisher, StreamRecord};

const COMPONENT: &str = "analysis_handler";

/// Failures that abort the invocation. Analysis service errors are not in
/// here: they are absorbed per batch. Results that cannot be placed in the
/// batch are, whichever side detects it.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("invalid review batch: {0}")]
    Event(#[from] EventError),
    #[error("analysis results do not line up with the batch: {0}")]
    Enrichment(#[from] EnrichmentError),
    #[error("analysis results do not line up with the batch: {0}")]
    MalformedAnalysis(AnalysisError),
    #[error(transparent)]
    Chunking(#[from] ChunkingError),
    #[error("failed to serialize enriched record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("stream write {write_id} failed: {source}")]
    Publish {
        write_id: usize,
        #[source]
        source: PublishError,
    },
}

pub fn handle_review_batch(
    payload: Value,
    config: &HandlerConfig,
    processed_at: &str,
    analyzer: &impl TextAnalyzer,
    publisher: &impl RecordPublisher,
) -> Result<HandlerSummary, HandlerError> {
    let from_table_stream = is_stream_event(&payload);
    let reviews = decode_review_batch(payload)?;
    ensure_batch_size(&reviews, config.max_batch_size)?;

    info!(
        component = COMPONENT,
        event = "batch_received",
        records = reviews.len(),
        from_table_stream
    );

    let records_received = reviews.len();
    let summary = |status: BatchStatus, records_published: usize, stream_writes: usize| HandlerSummary {
        status,
        records_received,
        records_published,
        stream_writes,
        processed_at: processed_at.to_string(),
        schema_version: HANDLER_SCHEMA_VERSION.to_string(),
    };

    if reviews.is_empty() {
        return Ok(summary(BatchStatus::Empty, 0, 0));
    }

    let texts: Vec<String> = reviews.iter().map(|record| record.review.clone()).collect();
    let (entities, syntax) = match analyze(analyzer, &texts) {
        Ok(results) => results,
        Err(analysis_error) if analysis_error.is_malformed_response() => {
            return Err(HandlerError::MalformedAnalysis(analysis_error));
        }
        Err(analysis_error) => {
            warn!(
                component = COMPONENT,
                event = "analysis_failed",
                records = records_received,
                error = %analysis_error,
                "dropping enrichment for this batch"
            );
            return Ok(summary(BatchStatus::AnalysisFailed, 0, 0));
        }
    };

    let enriched = enrich_batch(reviews, entities, syntax)?;
    let stream_writes = publish_enriched(&enriched, config.stream_batch_size, publisher)?;

    info!(
        component = COMPONENT,
        event = "batch_published",
        records = enriched.len(),
        stream_writes,
        stream = %config.stream_name
    );
    Ok(summary(BatchStatus::Published, enriched.len(), stream_writes))
}

fn analyze(
    analyzer: &impl TextAnalyzer,
    texts: &[String],
) -> Result<(Vec<IndexedEntities>, Vec<IndexedSyntax>), AnalysisError> {
    let entities = analyzer.detect_entities(texts)?;
    let syntax = analyzer.detect_syntax(texts)?;
    Ok((entities, syntax))
}

fn publish_enriched(
    enriched: &[EnrichedRecord],
    stream_batch_size: usize,
    publisher: &impl RecordPublisher,
) -> Result<usize, HandlerError> {
    let plan = plan_stream_writes(enriched.len(), stream_batch_size)?;

    for write in &plan {
        let records = enriched[write.range()]
            .iter()
            .map(to_stream_record)
            .collect::<Result<Vec<_>, _>>()?;

        publisher.put_records(&records).map_err(|source| {
            error!(
                component = COMPONENT,
                event = "stream_write_failed",
                write_id = write.write_id,
                records = records.len(),
                error = %source
            );
            HandlerError::Publish {
                write_id: write.write_id,
                source,
            }
        })?;
    }

    Ok(plan.len())
}

fn to_stream_record(record: &EnrichedRecord) -> Result<StreamRecord, serde_json::Error> {
    Ok(StreamRecord {
        partition_key: record.review.partition_key().to_string(),
        data: serde_json::to_vec(record)?,
    })
}
