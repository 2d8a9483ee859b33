use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const HANDLER_SCHEMA_VERSION: &str = "v1";
/// Placeholder product used by the simulation driver for every review it writes.
pub const SIMULATION_PRODUCT_ID: &str = "id-001";
pub const WRITE_ACTION: &str = "write";
pub const UNKNOWN_PARTITION_KEY: &str = "unknown";

/// A review as produced upstream. Fields other than `ProductId` and `Review`
/// are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub review: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ReviewRecord {
    pub fn new(product_id: impl Into<String>, review: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            review: review.into(),
            attributes: Map::new(),
        }
    }

    pub fn partition_key(&self) -> &str {
        match self.product_id.as_deref() {
            Some(value) if !value.trim().is_empty() => value,
            _ => UNKNOWN_PARTITION_KEY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Entity {
    pub text: String,
    #[serde(rename = "Type")]
    pub entity_type: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SyntaxToken {
    pub text: String,
    pub part_of_speech: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub review: ReviewRecord,
    pub entities: Vec<Entity>,
    pub syntax: Vec<SyntaxToken>,
}

/// Entity detection output for the review at `index` within the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEntities {
    pub index: usize,
    pub entities: Vec<Entity>,
}

/// Syntax analysis output for the review at `index` within the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedSyntax {
    pub index: usize,
    pub tokens: Vec<SyntaxToken>,
}

/// Body posted to the review API by the simulation driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewRequest {
    pub action: String,
    pub product_id: String,
    pub review: String,
}

impl ReviewRequest {
    pub fn write(review: impl Into<String>) -> Self {
        Self {
            action: WRITE_ACTION.to_string(),
            product_id: SIMULATION_PRODUCT_ID.to_string(),
            review: review.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Published,
    Empty,
    AnalysisFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandlerSummary {
    pub status: BatchStatus,
    pub records_received: usize,
    pub records_published: usize,
    pub stream_writes: usize,
    pub processed_at: String,
    pub schema_version: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn review_record_keeps_passthrough_fields() {
        let record: ReviewRecord = serde_json::from_value(json!({
            "ProductId": "p-1",
            "Review": "Great blender",
            "Timestamp": "2021-01-01T00:00:00Z"
        }))
        .expect("record should parse");

        assert_eq!(record.product_id.as_deref(), Some("p-1"));
        assert_eq!(
            record.attributes.get("Timestamp"),
            Some(&json!("2021-01-01T00:00:00Z"))
        );

        let value = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(value["Timestamp"], json!("2021-01-01T00:00:00Z"));
        assert_eq!(value["Review"], json!("Great blender"));
    }

    #[test]
    fn review_record_requires_review_text() {
        let error = serde_json::from_value::<ReviewRecord>(json!({"ProductId": "p-1"}))
            .expect_err("missing Review should fail");
        assert!(error.to_string().contains("Review"));
    }

    #[test]
    fn partition_key_falls_back_for_blank_product() {
        let mut record = ReviewRecord::new("  ", "text");
        assert_eq!(record.partition_key(), UNKNOWN_PARTITION_KEY);

        record.product_id = None;
        assert_eq!(record.partition_key(), UNKNOWN_PARTITION_KEY);

        record.product_id = Some("p-9".to_string());
        assert_eq!(record.partition_key(), "p-9");
    }

    #[test]
    fn enriched_record_serializes_flat() {
        let enriched = EnrichedRecord {
            review: ReviewRecord::new("p-1", "Alice loves Seattle"),
            entities: vec![Entity {
                text: "Seattle".to_string(),
                entity_type: "LOCATION".to_string(),
                score: 0.5,
            }],
            syntax: vec![SyntaxToken {
                text: "loves".to_string(),
                part_of_speech: "VERB".to_string(),
                score: 0.25,
            }],
        };

        let value = serde_json::to_value(&enriched).expect("record should serialize");
        assert_eq!(value["ProductId"], json!("p-1"));
        assert_eq!(value["Entities"][0]["Type"], json!("LOCATION"));
        assert_eq!(value["Entities"][0]["Score"], json!(0.5));
        assert_eq!(value["Syntax"][0]["PartOfSpeech"], json!("VERB"));
    }

    #[test]
    fn write_request_uses_fixed_shape() {
        let value = serde_json::to_value(ReviewRequest::write("Too loud")).expect("serialize");
        assert_eq!(
            value,
            json!({"Action": "write", "ProductId": "id-001", "Review": "Too loud"})
        );
    }
}
