use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{ChapterId, QuizSession};

use super::progress::QuizProgress;
use super::view::QuizScreenView;

/// A quiz session plus the wall-clock span of the attempt.
///
/// Created by `QuizLoopService`, which owns the clock; the session itself
/// stays time-free.
#[derive(Clone, PartialEq)]
pub struct QuizRun {
    session: QuizSession,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizRun {
    pub(crate) fn new(session: QuizSession, started_at: DateTime<Utc>) -> Self {
        Self {
            session,
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    #[must_use]
    pub fn chapter_id(&self) -> ChapterId {
        self.session.definition().chapter_id()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub(crate) fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed_at.get_or_insert(at);
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            current: self.session.current_index(),
            total: self.session.question_count(),
            answered: self.session.answered_count(),
            correct: self.session.correct_count(),
            is_complete: self.session.is_complete(),
        }
    }

    /// Snapshot of what the quiz screen should show right now.
    #[must_use]
    pub fn screen(&self) -> QuizScreenView {
        QuizScreenView::from_run(self)
    }
}

impl fmt::Debug for QuizRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizRun")
            .field("chapter_id", &self.chapter_id())
            .field("current", &self.session.current_index())
            .field("questions", &self.session.question_count())
            .field("correct", &self.session.correct_count())
            .field("state", &self.session.state())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}
