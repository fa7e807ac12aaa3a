//! JSON content bundles.
//!
//! A bundle is either a bare array of quizzes or an object wrapping them in
//! a `quizzes` field. Both layouts show up in existing content.

use std::collections::BTreeSet;

use quiz_core::model::{ChapterId, QuizDefinition};
use serde::Deserialize;

use crate::repository::StorageError;

mod mapping;

/// Sample robotaxi chapters shipped with the crate.
pub const BUNDLED_QUIZZES: &str = include_str!("../../data/robotaxi_quizzes.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    #[serde(alias = "correctIndex")]
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub chapter_id: ChapterId,
    #[serde(default)]
    pub title: Option<String>,
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Bundle {
    List(Vec<QuizRecord>),
    Wrapped { quizzes: Vec<QuizRecord> },
}

impl Bundle {
    fn into_records(self) -> Vec<QuizRecord> {
        match self {
            Bundle::List(records) | Bundle::Wrapped { quizzes: records } => records,
        }
    }
}

/// Parse and validate every quiz in a bundle, keeping file order.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the JSON does not match either
/// layout, and `StorageError::InvalidContent` if a quiz fails validation or a
/// chapter appears twice.
pub fn parse_bundle(raw: &str) -> Result<Vec<QuizDefinition>, StorageError> {
    let bundle: Bundle =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let mut seen = BTreeSet::<ChapterId>::new();
    let mut quizzes = Vec::new();
    for record in bundle.into_records() {
        if !seen.insert(record.chapter_id) {
            return Err(StorageError::InvalidContent(format!(
                "chapter {} appears more than once",
                record.chapter_id
            )));
        }
        quizzes.push(record.into_definition()?);
    }
    Ok(quizzes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_wrapped_layout_with_correct_index() {
        let raw = r#"{
            "quizzes": [{
                "chapterId": 5,
                "questions": [{
                    "question": "Can AI make mistakes?",
                    "options": ["Yes", "No"],
                    "correctIndex": 0
                }]
            }]
        }"#;

        let quizzes = parse_bundle(raw).unwrap();
        assert_eq!(quizzes.len(), 1);
        let quiz = &quizzes[0];
        assert_eq!(quiz.chapter_id(), ChapterId::new(5));
        assert_eq!(quiz.title(), None);
        assert_eq!(quiz.question(0).unwrap().correct_index(), 0);
        assert_eq!(quiz.question(0).unwrap().explanation(), "");
    }

    #[test]
    fn rejects_duplicate_chapters() {
        let raw = r#"[
            {"chapterId": 1, "questions": [{"question": "a", "options": ["x", "y"], "correctAnswer": 0}]},
            {"chapterId": 1, "questions": [{"question": "b", "options": ["x", "y"], "correctAnswer": 1}]}
        ]"#;

        let err = parse_bundle(raw).unwrap_err();
        assert!(matches!(err, StorageError::InvalidContent(msg) if msg.contains("chapter 1")));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = parse_bundle(r#"{"chapters": []}"#).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn bundled_content_is_valid() {
        let quizzes = parse_bundle(BUNDLED_QUIZZES).unwrap();
        assert_eq!(quizzes.len(), 3);
        assert!(quizzes.iter().all(|q| q.title().is_some()));
    }
}
