//! Decoding of handler invocation payloads into review batches.
//!
//! Two shapes are accepted: a bare JSON array of review objects, and a
//! DynamoDB stream event whose `NewImage` attributes carry the review.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::contract::ReviewRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("invocation payload must be an array of reviews or a DynamoDB stream event")]
    UnsupportedShape,
    #[error("record {index} is not a valid review: {message}")]
    InvalidRecord { index: usize, message: String },
    #[error("record {index} has an unsupported attribute value: {message}")]
    InvalidAttribute { index: usize, message: String },
    #[error("batch of {len} reviews exceeds the maximum of {max}")]
    BatchTooLarge { len: usize, max: usize },
}

pub fn decode_review_batch(payload: Value) -> Result<Vec<ReviewRecord>, EventError> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_review(index, item))
            .collect(),
        Value::Object(mut object) => match object.remove("Records") {
            Some(Value::Array(records)) if records.iter().all(is_dynamodb_record) => {
                decode_stream_records(records)
            }
            _ => Err(EventError::UnsupportedShape),
        },
        _ => Err(EventError::UnsupportedShape),
    }
}

pub fn ensure_batch_size(batch: &[ReviewRecord], max: usize) -> Result<(), EventError> {
    if batch.len() > max {
        return Err(EventError::BatchTooLarge {
            len: batch.len(),
            max,
        });
    }
    Ok(())
}

/// True when `payload` carries a `Records` array made only of DynamoDB
/// stream records.
pub fn is_stream_event(payload: &Value) -> bool {
    payload
        .get("Records")
        .and_then(Value::as_array)
        .map(|records| records.iter().all(is_dynamodb_record))
        .unwrap_or(false)
}

fn is_dynamodb_record(record: &Value) -> bool {
    record
        .get("eventSource")
        .and_then(Value::as_str)
        .map(|source| source == "aws:dynamodb")
        .unwrap_or(false)
}

fn decode_stream_records(records: Vec<Value>) -> Result<Vec<ReviewRecord>, EventError> {
    let mut reviews = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let event_name = record.get("eventName").and_then(Value::as_str);
        if event_name == Some("REMOVE") {
            continue;
        }

        let Some(image) = record
            .get("dynamodb")
            .and_then(|change| change.get("NewImage"))
            .and_then(Value::as_object)
        else {
            return Err(EventError::InvalidRecord {
                index,
                message: "missing dynamodb.NewImage".to_string(),
            });
        };

        let flattened = flatten_image(image)
            .map_err(|message| EventError::InvalidAttribute { index, message })?;
        reviews.push(parse_review(index, Value::Object(flattened))?);
    }
    Ok(reviews)
}

fn parse_review(index: usize, item: Value) -> Result<ReviewRecord, EventError> {
    serde_json::from_value(item).map_err(|error| EventError::InvalidRecord {
        index,
        message: error.to_string(),
    })
}

fn flatten_image(image: &Map<String, Value>) -> Result<Map<String, Value>, String> {
    image
        .iter()
        .map(|(name, attribute)| Ok((name.clone(), attribute_to_json(attribute)?)))
        .collect()
}

/// Converts one DynamoDB attribute value (`{"S": "..."}` and friends) into
/// plain JSON.
fn attribute_to_json(attribute: &Value) -> Result<Value, String> {
    let Some((tag, inner)) = attribute
        .as_object()
        .filter(|object| object.len() == 1)
        .and_then(|object| object.iter().next())
    else {
        return Err(format!("expected a single-key attribute, got {attribute}"));
    };

    match (tag.as_str(), inner) {
        ("S", Value::String(_)) | ("BOOL", Value::Bool(_)) => Ok(inner.clone()),
        ("NULL", _) => Ok(Value::Null),
        ("N", Value::String(text)) => parse_number(text),
        ("M", Value::Object(map)) => flatten_image(map).map(Value::Object),
        ("L", Value::Array(items)) => items
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        ("SS", Value::Array(items)) => Ok(Value::Array(items.clone())),
        ("NS", Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => parse_number(text),
                other => Err(format!("number set member must be a string, got {other}")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        _ => Err(format!("unsupported attribute type {tag}")),
    }
}

fn parse_number(text: &str) -> Result<Value, String> {
    if let Ok(integer) = text.parse::<i64>() {
        return Ok(Value::from(integer));
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("invalid number attribute {text:?}"))
}
