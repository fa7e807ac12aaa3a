use std::sync::Arc;

use quiz_core::model::{Advance, AnswerFeedback, ChapterId, QuizSession, StarThresholds};
use storage::repository::{QuizRepository, StorageError};

use super::run::QuizRun;
use super::view::QuizResultsView;
use crate::Clock;
use crate::error::QuizError;

/// Orchestrates quiz lookup, answering, and results.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
    thresholds: StarThresholds,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self {
            clock,
            quizzes,
            thresholds: StarThresholds::default(),
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: StarThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Start a quiz for the given chapter.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFound` if the chapter has no quiz, or
    /// `QuizError::Storage` for other repository failures.
    pub async fn start_quiz(&self, chapter_id: ChapterId) -> Result<QuizRun, QuizError> {
        let definition = self.quizzes.get_quiz(chapter_id).await.map_err(|e| match e {
            StorageError::NotFound => {
                tracing::info!(%chapter_id, "no quiz for chapter");
                QuizError::NotFound(chapter_id)
            }
            other => {
                tracing::error!(%chapter_id, error = %other, "failed to load quiz");
                QuizError::Storage(other)
            }
        })?;

        tracing::info!(
            %chapter_id,
            questions = definition.question_count(),
            "starting quiz"
        );
        Ok(QuizRun::new(
            QuizSession::new(definition, self.thresholds),
            self.clock.now(),
        ))
    }

    /// Record an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` for an out-of-range option or a completed run.
    pub fn answer(&self, run: &mut QuizRun, option_index: usize) -> Result<AnswerFeedback, QuizError> {
        let chapter_id = run.chapter_id();
        let feedback = run
            .session_mut()
            .submit_answer(option_index)
            .inspect_err(|e| tracing::warn!(%chapter_id, option_index, error = %e, "rejected answer"))?;

        tracing::debug!(
            %chapter_id,
            question = feedback.question_index,
            selected = feedback.selected,
            correct = feedback.is_correct,
            "answer recorded"
        );
        Ok(feedback)
    }

    /// Move past the answered question; stamps the completion time on the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` if the current question is unanswered or the run is complete.
    pub fn advance(&self, run: &mut QuizRun) -> Result<Advance, QuizError> {
        let chapter_id = run.chapter_id();
        let step = run
            .session_mut()
            .advance()
            .inspect_err(|e| tracing::warn!(%chapter_id, error = %e, "rejected advance"))?;

        if step == Advance::Completed {
            run.mark_completed(self.clock.now());
            tracing::info!(
                %chapter_id,
                correct = run.session().correct_count(),
                total = run.session().question_count(),
                "quiz completed"
            );
        }
        Ok(step)
    }

    /// Fresh attempt at the same quiz. Nothing carries over.
    #[must_use]
    pub fn retry(&self, run: &QuizRun) -> QuizRun {
        tracing::debug!(chapter_id = %run.chapter_id(), "retrying quiz");
        QuizRun::new(run.session().restarted(), self.clock.now())
    }

    /// Results for a completed run.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` if the run is not complete, or
    /// `QuizError::Storage` if the chapter catalog cannot be read.
    pub async fn results(&self, run: &QuizRun) -> Result<QuizResultsView, QuizError> {
        let rating = run.session().star_rating()?;
        let completed_at = run.completed_at().unwrap_or_else(|| self.clock.now());
        let next_chapter = self.next_chapter(run.chapter_id()).await?;
        Ok(QuizResultsView::new(run, rating, completed_at, next_chapter))
    }

    /// The chapter after `chapter_id` in the catalog, if any.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the chapter catalog cannot be read.
    pub async fn next_chapter(&self, chapter_id: ChapterId) -> Result<Option<ChapterId>, QuizError> {
        let chapters = self.quizzes.list_chapters().await?;
        Ok(chapters.into_iter().find(|c| *c > chapter_id))
    }

    /// All chapters with a quiz, ascending.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the chapter catalog cannot be read.
    pub async fn chapters(&self) -> Result<Vec<ChapterId>, QuizError> {
        Ok(self.quizzes.list_chapters().await?)
    }
}
