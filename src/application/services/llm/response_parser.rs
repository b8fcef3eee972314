//! Response parsing - decode and validate raw generator output
//!
//! Output that is not valid JSON, has the wrong shape, or leaves a required
//! field empty is rejected. Nothing is defaulted or repaired.

use serde::Deserialize;

use crate::domain::value_objects::{CardDraft, StoryBackground};

#[derive(Debug, Deserialize)]
struct StoryRecord {
    story_background: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CardRecord {
    name: Option<String>,
    description: Option<String>,
    effect: Option<String>,
}

/// Parse `{"story_background": "..."}`
pub fn parse_story(raw: &str) -> Result<StoryBackground, ResponseError> {
    let record: StoryRecord = serde_json::from_str(raw)?;
    let story = required(record.story_background, "story_background", None)?;
    Ok(StoryBackground::new(story))
}

/// Parse `[{"name": ..., "description": ..., "effect": ...}, ...]`
pub fn parse_card_batch(raw: &str) -> Result<Vec<CardDraft>, ResponseError> {
    let records: Vec<CardRecord> = serde_json::from_str(raw)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Ok(CardDraft {
                name: required(record.name, "name", Some(index))?,
                description: required(record.description, "description", Some(index))?,
                effect: required(record.effect, "effect", Some(index))?,
            })
        })
        .collect()
}

fn required(
    value: Option<String>,
    field: &'static str,
    index: Option<usize>,
) -> Result<String, ResponseError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ResponseError::Schema { field, index }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// Not JSON, or JSON of the wrong shape
    #[error("malformed generator output: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A required field is missing or empty
    #[error("{}", describe_schema_error(field, *index))]
    Schema {
        field: &'static str,
        index: Option<usize>,
    },
}

fn describe_schema_error(field: &str, index: Option<usize>) -> String {
    match index {
        Some(index) => format!("card {} is missing required field `{}`", index, field),
        None => format!("missing required field `{}`", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_story() {
        let story = parse_story(r#"{"story_background": "The realm of Eldoria..."}"#).unwrap();
        assert_eq!(story.as_str(), "The realm of Eldoria...");
    }

    #[test]
    fn test_parse_story_rejects_invalid_json() {
        let err = parse_story("Once upon a time").unwrap_err();
        assert!(matches!(err, ResponseError::Malformed(_)));
    }

    #[test]
    fn test_parse_story_rejects_empty_background() {
        for raw in [
            r#"{"story_background": ""}"#,
            r#"{"story_background": "   "}"#,
            r#"{"story": "misnamed"}"#,
        ] {
            let err = parse_story(raw).unwrap_err();
            assert!(
                matches!(err, ResponseError::Schema { field: "story_background", index: None }),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_parse_card_batch() {
        let raw = r#"[
            {"name": "Lysandra", "description": "A wise Elven Mage", "effect": "Arcane Bolt", "extra": 1},
            {"name": "Borin", "description": "A stout Dwarf Warrior", "effect": "Shield Bash"}
        ]"#;
        let cards = parse_card_batch(raw).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Lysandra");
        assert_eq!(cards[1].effect, "Shield Bash");
    }

    #[test]
    fn test_parse_card_batch_reports_failing_card() {
        let raw = r#"[
            {"name": "Lysandra", "description": "A wise Elven Mage", "effect": "Arcane Bolt"},
            {"name": "Borin", "description": "A stout Dwarf Warrior"}
        ]"#;
        let err = parse_card_batch(raw).unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Schema {
                field: "effect",
                index: Some(1)
            }
        ));
        assert_eq!(err.to_string(), "card 1 is missing required field `effect`");
    }

    #[test]
    fn test_parse_card_batch_requires_an_array() {
        let raw = r#"{"name": "Lysandra", "description": "Mage", "effect": "Bolt"}"#;
        assert!(matches!(
            parse_card_batch(raw).unwrap_err(),
            ResponseError::Malformed(_)
        ));
    }

    #[test]
    fn test_parse_empty_batch_is_allowed() {
        assert!(parse_card_batch("[]").unwrap().is_empty());
    }
}
