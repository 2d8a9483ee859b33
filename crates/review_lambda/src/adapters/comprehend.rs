use aws_sdk_comprehend::error::DisplayErrorContext;
use aws_sdk_comprehend::types::{
    BatchDetectEntitiesItemResult, BatchDetectSyntaxItemResult, BatchItemError, LanguageCode,
    SyntaxLanguageCode,
};
use review_core::contract::{Entity, IndexedEntities, IndexedSyntax, SyntaxToken};

use super::analyzer::{AnalysisError, TextAnalyzer, DETECT_ENTITIES, DETECT_SYNTAX};
use super::block_on_sdk;

pub struct ComprehendAnalyzer {
    client: aws_sdk_comprehend::Client,
}

impl ComprehendAnalyzer {
    pub fn new(client: aws_sdk_comprehend::Client) -> Self {
        Self { client }
    }
}

impl TextAnalyzer for ComprehendAnalyzer {
    fn detect_entities(&self, texts: &[String]) -> Result<Vec<IndexedEntities>, AnalysisError> {
        let request = self
            .client
            .batch_detect_entities()
            .set_text_list(Some(texts.to_vec()))
            .language_code(LanguageCode::En);

        let output = block_on_sdk(request.send()).map_err(|error| AnalysisError::Service {
            operation: DETECT_ENTITIES,
            message: DisplayErrorContext(&error).to_string(),
        })?;
        check_item_errors(DETECT_ENTITIES, output.error_list())?;

        entities_from(output.result_list())
    }

    fn detect_syntax(&self, texts: &[String]) -> Result<Vec<IndexedSyntax>, AnalysisError> {
        let request = self
            .client
            .batch_detect_syntax()
            .set_text_list(Some(texts.to_vec()))
            .language_code(SyntaxLanguageCode::En);

        let output = block_on_sdk(request.send()).map_err(|error| AnalysisError::Service {
            operation: DETECT_SYNTAX,
            message: DisplayErrorContext(&error).to_string(),
        })?;
        check_item_errors(DETECT_SYNTAX, output.error_list())?;

        syntax_from(output.result_list())
    }
}

fn entities_from(
    results: &[BatchDetectEntitiesItemResult],
) -> Result<Vec<IndexedEntities>, AnalysisError> {
    results
        .iter()
        .map(|item| {
            Ok(IndexedEntities {
                index: result_index(DETECT_ENTITIES, item.index())?,
                entities: item
                    .entities()
                    .iter()
                    .map(|entity| Entity {
                        text: entity.text().unwrap_or_default().to_string(),
                        entity_type: entity
                            .r#type()
                            .map(|value| value.as_str().to_string())
                            .unwrap_or_default(),
                        score: score_to_f64(entity.score()),
                    })
                    .collect(),
            })
        })
        .collect()
}

fn syntax_from(
    results: &[BatchDetectSyntaxItemResult],
) -> Result<Vec<IndexedSyntax>, AnalysisError> {
    results
        .iter()
        .map(|item| {
            Ok(IndexedSyntax {
                index: result_index(DETECT_SYNTAX, item.index())?,
                tokens: item
                    .syntax_tokens()
                    .iter()
                    .map(|token| {
                        let tag = token.part_of_speech();
                        SyntaxToken {
                            text: token.text().unwrap_or_default().to_string(),
                            part_of_speech: tag
                                .and_then(|value| value.tag())
                                .map(|value| value.as_str().to_string())
                                .unwrap_or_default(),
                            score: score_to_f64(tag.and_then(|value| value.score())),
                        }
                    })
                    .collect(),
            })
        })
        .collect()
}

fn check_item_errors(
    operation: &'static str,
    errors: &[BatchItemError],
) -> Result<(), AnalysisError> {
    let Some(first) = errors.first() else {
        return Ok(());
    };
    Err(AnalysisError::ItemFailed {
        operation,
        index: result_index(operation, first.index())?,
        code: first.error_code().unwrap_or("Unknown").to_string(),
        message: first.error_message().unwrap_or_default().to_string(),
    })
}

fn result_index(operation: &'static str, index: Option<i32>) -> Result<usize, AnalysisError> {
    index
        .and_then(|value| usize::try_from(value).ok())
        .ok_or(AnalysisError::MissingIndex { operation })
}

/// Widens a service score without exposing `f32` rounding noise, so 0.9987
/// serializes as 0.9987 rather than 0.9987000226974487.
fn score_to_f64(score: Option<f32>) -> f64 {
    let Some(score) = score else {
        return 0.0;
    };
    score.to_string().parse().unwrap_or(f64::from(score))
}

#[cfg(test)]
mod tests {
    use aws_sdk_comprehend::types::{
        Entity as SdkEntity, EntityType, PartOfSpeechTag, PartOfSpeechTagType,
        SyntaxToken as SdkSyntaxToken,
    };

    use super::*;

    #[test]
    fn maps_entity_results_with_their_index() {
        let results = vec![
            BatchDetectEntitiesItemResult::builder()
                .index(1)
                .entities(
                    SdkEntity::builder()
                        .text("Seattle")
                        .r#type(EntityType::Location)
                        .score(0.9987)
                        .build(),
                )
                .build(),
            BatchDetectEntitiesItemResult::builder().index(0).build(),
        ];

        let mapped = entities_from(&results).expect("results should map");

        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].index, 1);
        assert_eq!(
            mapped[0].entities,
            vec![Entity {
                text: "Seattle".to_string(),
                entity_type: "LOCATION".to_string(),
                score: 0.9987,
            }]
        );
        assert_eq!(mapped[1].index, 0);
        assert!(mapped[1].entities.is_empty());
    }

    #[test]
    fn maps_syntax_tokens_with_tag_and_score() {
        let results = vec![BatchDetectSyntaxItemResult::builder()
            .index(0)
            .syntax_tokens(
                SdkSyntaxToken::builder()
                    .text("loves")
                    .part_of_speech(
                        PartOfSpeechTag::builder()
                            .tag(PartOfSpeechTagType::Verb)
                            .score(0.25)
                            .build(),
                    )
                    .build(),
            )
            .syntax_tokens(SdkSyntaxToken::builder().text("!").build())
            .build()];

        let mapped = syntax_from(&results).expect("results should map");

        assert_eq!(
            mapped[0].tokens,
            vec![
                SyntaxToken {
                    text: "loves".to_string(),
                    part_of_speech: "VERB".to_string(),
                    score: 0.25,
                },
                SyntaxToken {
                    text: "!".to_string(),
                    part_of_speech: String::new(),
                    score: 0.0,
                },
            ]
        );
    }

    #[test]
    fn result_without_index_is_rejected() {
        let results = vec![BatchDetectSyntaxItemResult::builder().build()];
        assert_eq!(
            syntax_from(&results),
            Err(AnalysisError::MissingIndex {
                operation: DETECT_SYNTAX
            })
        );
    }

    #[test]
    fn score_keeps_shortest_decimal_form() {
        assert_eq!(score_to_f64(Some(0.9987)), 0.9987);
        assert_eq!(score_to_f64(Some(1.0)), 1.0);
        assert_eq!(score_to_f64(None), 0.0);
    }

    #[test]
    fn result_index_rejects_missing_and_negative() {
        assert_eq!(result_index(DETECT_SYNTAX, Some(3)), Ok(3));
        assert_eq!(
            result_index(DETECT_SYNTAX, Some(-1)),
            Err(AnalysisError::MissingIndex {
                operation: DETECT_SYNTAX
            })
        );
        assert!(result_index(DETECT_ENTITIES, None).is_err());
    }

    #[test]
    fn first_item_error_fails_the_call() {
        let errors = vec![BatchItemError::builder()
            .index(1)
            .error_code("TEXT_SIZE_LIMIT_EXCEEDED")
            .error_message("document too large")
            .build()];

        let error = check_item_errors(DETECT_ENTITIES, &errors).expect_err("item error should fail");
        assert_eq!(
            error,
            AnalysisError::ItemFailed {
                operation: DETECT_ENTITIES,
                index: 1,
                code: "TEXT_SIZE_LIMIT_EXCEEDED".to_string(),
                message: "document too large".to_string(),
            }
        );
        assert!(check_item_errors(DETECT_ENTITIES, &[]).is_ok());
    }
}
