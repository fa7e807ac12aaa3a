use std::sync::Arc;

use thiserror::Error;

use crate::model::{
    question::Question,
    quiz::QuizDefinition,
    rating::{StarRating, StarThresholds},
};

/// Caller invoked a session operation the current state does not allow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("question {question_index} has not been answered yet")]
    Unanswered { question_index: usize },

    #[error("quiz session already completed")]
    Completed,

    #[error("quiz session is not complete yet")]
    NotComplete,
}

/// Where the session sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for an answer to the current question.
    Unanswered,
    /// Answer recorded; feedback is showing until `advance`.
    Answered,
    /// Last question acknowledged. Terminal until restarted.
    Complete,
}

/// Feedback for the question that was just answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_index: usize,
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: String,
}

/// Outcome of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextQuestion { index: usize },
    Completed,
}

/// One learner's attempt at a quiz.
///
/// Questions are walked strictly in order. Each question accepts a single
/// answer; `advance` moves on once that answer has been recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    definition: Arc<QuizDefinition>,
    thresholds: StarThresholds,
    current: usize,
    selected: Option<usize>,
    correct_count: usize,
    complete: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(definition: Arc<QuizDefinition>, thresholds: StarThresholds) -> Self {
        Self {
            definition,
            thresholds,
            current: 0,
            selected: None,
            correct_count: 0,
            complete: false,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &Arc<QuizDefinition> {
        &self.definition
    }

    #[must_use]
    pub fn thresholds(&self) -> StarThresholds {
        self.thresholds
    }

    /// The question being shown. Stays on the last question once complete.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.definition.questions()[self.current]
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.definition.question_count()
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// `None` until the current question has been answered.
    #[must_use]
    pub fn last_answer_correct(&self) -> Option<bool> {
        self.selected
            .map(|selected| self.current_question().is_correct(selected))
    }

    /// Feedback for the recorded answer on the current question, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<AnswerFeedback> {
        self.selected.map(|selected| self.feedback_for(selected))
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Questions answered so far, including the current one once answered.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        if self.complete {
            self.question_count()
        } else {
            self.current + usize::from(self.selected.is_some())
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match (self.complete, self.selected) {
            (true, _) => SessionState::Complete,
            (false, Some(_)) => SessionState::Answered,
            (false, None) => SessionState::Unanswered,
        }
    }

    /// Records an answer for the current question.
    ///
    /// A second call for the same question leaves the session untouched and
    /// returns the feedback for the answer already recorded.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Completed` once the session is complete and
    /// `QuizSessionError::OptionOutOfRange` for an index the question does not have.
    pub fn submit_answer(&mut self, option_index: usize) -> Result<AnswerFeedback, QuizSessionError> {
        if self.complete {
            return Err(QuizSessionError::Completed);
        }
        let question = self.current_question();
        let len = question.option_count();
        if option_index >= len {
            return Err(QuizSessionError::OptionOutOfRange {
                index: option_index,
                len,
            });
        }

        if let Some(selected) = self.selected {
            return Ok(self.feedback_for(selected));
        }

        if question.is_correct(option_index) {
            self.correct_count += 1;
        }
        self.selected = Some(option_index);
        Ok(self.feedback_for(option_index))
    }

    /// Moves past the answered question, or completes the session on the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Unanswered` if no answer is recorded yet and
    /// `QuizSessionError::Completed` once the session is complete.
    pub fn advance(&mut self) -> Result<Advance, QuizSessionError> {
        if self.complete {
            return Err(QuizSessionError::Completed);
        }
        if self.selected.is_none() {
            return Err(QuizSessionError::Unanswered {
                question_index: self.current,
            });
        }

        if self.current + 1 < self.question_count() {
            self.current += 1;
            self.selected = None;
            Ok(Advance::NextQuestion {
                index: self.current,
            })
        } else {
            self.complete = true;
            Ok(Advance::Completed)
        }
    }

    /// # Errors
    ///
    /// Returns `QuizSessionError::NotComplete` before the last question is acknowledged.
    pub fn star_rating(&self) -> Result<StarRating, QuizSessionError> {
        if !self.complete {
            return Err(QuizSessionError::NotComplete);
        }
        Ok(self.thresholds.rate(self.correct_count, self.question_count()))
    }

    /// Resets to a fresh attempt over the same quiz.
    pub fn restart(&mut self) {
        *self = self.restarted();
    }

    #[must_use]
    pub fn restarted(&self) -> Self {
        Self::new(Arc::clone(&self.definition), self.thresholds)
    }

    fn feedback_for(&self, selected: usize) -> AnswerFeedback {
        let question = self.current_question();
        AnswerFeedback {
            question_index: self.current,
            selected,
            correct_index: question.correct_index(),
            is_correct: question.is_correct(selected),
            explanation: question.explanation().to_string(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
