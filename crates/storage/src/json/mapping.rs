use quiz_core::model::{Question, QuizDefinition};

use super::{QuestionRecord, QuizRecord};
use crate::repository::StorageError;

impl QuestionRecord {
    fn into_question(self) -> Result<Question, quiz_core::model::QuestionError> {
        Question::new(self.question, self.options, self.correct_answer, self.explanation)
    }
}

impl QuizRecord {
    /// Convert the record into a validated `QuizDefinition`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidContent` naming the chapter (and question,
    /// 1-based) that failed validation.
    pub fn into_definition(self) -> Result<QuizDefinition, StorageError> {
        let chapter_id = self.chapter_id;
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                record.into_question().map_err(|e| {
                    StorageError::InvalidContent(format!(
                        "chapter {chapter_id}, question {}: {e}",
                        i + 1
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let quiz = QuizDefinition::new(chapter_id, questions)
            .map_err(|e| StorageError::InvalidContent(e.to_string()))?;
        Ok(match self.title {
            Some(title) => quiz.with_title(title),
            None => quiz,
        })
    }
}
