use thiserror::Error;

use crate::contract::{EnrichedRecord, IndexedEntities, IndexedSyntax, ReviewRecord};

/// Keys produced by enrichment; upstream values under these names are dropped.
const ENRICHMENT_KEYS: [&str; 2] = ["Entities", "Syntax"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichmentError {
    #[error("{kind} result index {index} is outside a batch of {batch_len}")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        batch_len: usize,
    },
    #[error("{kind} result index {index} appears more than once")]
    DuplicateIndex { kind: &'static str, index: usize },
    #[error("no {kind} result for review at index {index}")]
    MissingResult { kind: &'static str, index: usize },
}

/// Joins both analysis outputs onto their reviews by the index each result
/// carries, so the outcome does not depend on the order results arrive in.
/// Every review must receive exactly one result of each kind.
pub fn enrich_batch(
    reviews: Vec<ReviewRecord>,
    entities: Vec<IndexedEntities>,
    syntax: Vec<IndexedSyntax>,
) -> Result<Vec<EnrichedRecord>, EnrichmentError> {
    let batch_len = reviews.len();
    let mut entities_by_index = slot_by_index(
        "entity",
        batch_len,
        entities.into_iter().map(|item| (item.index, item.entities)),
    )?;
    let mut syntax_by_index = slot_by_index(
        "syntax",
        batch_len,
        syntax.into_iter().map(|item| (item.index, item.tokens)),
    )?;

    reviews
        .into_iter()
        .enumerate()
        .map(|(index, mut review)| {
            let entities = entities_by_index[index]
                .take()
                .ok_or(EnrichmentError::MissingResult {
                    kind: "entity",
                    index,
                })?;
            let syntax = syntax_by_index[index]
                .take()
                .ok_or(EnrichmentError::MissingResult {
                    kind: "syntax",
                    index,
                })?;
            for key in ENRICHMENT_KEYS {
                review.attributes.remove(key);
            }
            Ok(EnrichedRecord {
                review,
                entities,
                syntax,
            })
        })
        .collect()
}

fn slot_by_index<T>(
    kind: &'static str,
    batch_len: usize,
    items: impl Iterator<Item = (usize, T)>,
) -> Result<Vec<Option<T>>, EnrichmentError> {
    let mut slots: Vec<Option<T>> = (0..batch_len).map(|_| None).collect();
    for (index, value) in items {
        let slot = slots
            .get_mut(index)
            .ok_or(EnrichmentError::IndexOutOfRange {
                kind,
                index,
                batch_len,
            })?;
        if slot.is_some() {
            return Err(EnrichmentError::DuplicateIndex { kind, index });
        }
        *slot = Some(value);
    }
    Ok(slots)
}
