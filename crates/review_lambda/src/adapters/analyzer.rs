use review_core::contract::{IndexedEntities, IndexedSyntax};
use thiserror::Error;

pub const DETECT_ENTITIES: &str = "BatchDetectEntities";
pub const DETECT_SYNTAX: &str = "BatchDetectSyntax";

/// Failures reported by the text analysis service. Service and per-item
/// failures are recoverable at batch granularity; malformed responses are not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },
    #[error("{operation} rejected document {index}: {code}: {message}")]
    ItemFailed {
        operation: &'static str,
        index: usize,
        code: String,
        message: String,
    },
    #[error("{operation} returned a result without a valid index")]
    MissingIndex { operation: &'static str },
}

impl AnalysisError {
    /// The service answered, but a result cannot be placed in the batch.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MissingIndex { .. })
    }
}

/// English-language batch text analysis. Each call covers the whole batch and
/// tags every result with the position of its source text in `texts`.
pub trait TextAnalyzer {
    fn detect_entities(&self, texts: &[String]) -> Result<Vec<IndexedEntities>, AnalysisError>;
    fn detect_syntax(&self, texts: &[String]) -> Result<Vec<IndexedSyntax>, AnalysisError>;
}
