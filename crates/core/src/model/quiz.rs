use thiserror::Error;

use crate::model::{ids::ChapterId, question::Question};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizDefinitionError {
    #[error("quiz for chapter {chapter_id} has no questions")]
    NoQuestions { chapter_id: ChapterId },
}

/// Ordered, non-empty list of questions for one chapter.
///
/// Loaded wholesale before a session starts and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDefinition {
    chapter_id: ChapterId,
    title: Option<String>,
    questions: Vec<Question>,
}

impl QuizDefinition {
    /// # Errors
    ///
    /// Returns `QuizDefinitionError::NoQuestions` if `questions` is empty.
    pub fn new(chapter_id: ChapterId, questions: Vec<Question>) -> Result<Self, QuizDefinitionError> {
        if questions.is_empty() {
            return Err(QuizDefinitionError::NoQuestions { chapter_id });
        }
        Ok(Self {
            chapter_id,
            title: None,
            questions,
        })
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = (!title.trim().is_empty()).then_some(title);
        self
    }

    #[must_use]
    pub fn chapter_id(&self) -> ChapterId {
        self.chapter_id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Always at least 1.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str) -> Question {
        Question::new(prompt, vec!["yes".into(), "no".into()], 0, "").unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let err = QuizDefinition::new(ChapterId::new(4), Vec::new()).unwrap_err();
        assert_eq!(
            err,
            QuizDefinitionError::NoQuestions {
                chapter_id: ChapterId::new(4)
            }
        );
    }

    #[test]
    fn keeps_question_order() {
        let quiz = QuizDefinition::new(ChapterId::new(1), vec![question("first"), question("second")])
            .unwrap()
            .with_title("Meet Aiko");

        assert_eq!(quiz.question_count(), 2);
        assert_eq!(quiz.question(0).unwrap().prompt(), "first");
        assert_eq!(quiz.question(1).unwrap().prompt(), "second");
        assert!(quiz.question(2).is_none());
        assert_eq!(quiz.title(), Some("Meet Aiko"));
    }

    #[test]
    fn blank_title_is_dropped() {
        let quiz = QuizDefinition::new(ChapterId::new(1), vec![question("q")])
            .unwrap()
            .with_title("   ");
        assert_eq!(quiz.title(), None);
    }
}
