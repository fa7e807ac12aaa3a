use chrono::{DateTime, Utc};

use quiz_core::model::{
    AnswerFeedback, ChapterId, QuizSession, StarRating, option_label, percentage,
};

use super::progress::QuizProgress;
use super::run::QuizRun;

//
// ─── QUIZ SCREEN ───────────────────────────────────────────────────────────────
//

/// How an option should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    /// Not answered yet, or neither chosen nor correct.
    Idle,
    /// The correct option, revealed once the question is answered.
    Correct,
    /// The learner's pick, when it was wrong.
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub text: String,
    pub state: OptionState,
    pub selected: bool,
}

/// Presentation-agnostic snapshot of the current question.
///
/// Options stay tappable only while `feedback` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizScreenView {
    pub chapter_id: ChapterId,
    pub title: Option<String>,
    /// 1-based, for "Question 2 of 5".
    pub question_number: usize,
    pub total_questions: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub feedback: Option<AnswerFeedback>,
    pub progress: QuizProgress,
}

impl QuizScreenView {
    pub(crate) fn from_run(run: &QuizRun) -> Self {
        let session = run.session();
        let question = session.current_question();
        let selected = session.selected_answer();

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| OptionView {
                label: option_label(index),
                text: text.clone(),
                state: option_state(session, index),
                selected: selected == Some(index),
            })
            .collect();

        Self {
            chapter_id: run.chapter_id(),
            title: session.definition().title().map(str::to_owned),
            question_number: session.current_index() + 1,
            total_questions: session.question_count(),
            prompt: question.prompt().to_owned(),
            options,
            feedback: session.feedback(),
            progress: run.progress(),
        }
    }

    #[must_use]
    pub fn accepts_answer(&self) -> bool {
        self.feedback.is_none() && !self.progress.is_complete
    }
}

fn option_state(session: &QuizSession, index: usize) -> OptionState {
    let Some(selected) = session.selected_answer() else {
        return OptionState::Idle;
    };
    let question = session.current_question();
    if question.is_correct(index) {
        OptionState::Correct
    } else if index == selected {
        OptionState::Wrong
    } else {
        OptionState::Idle
    }
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Tone of the results screen, picked from the star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsHeadline {
    Perfect,
    Great,
    KeepLearning,
}

impl ResultsHeadline {
    #[must_use]
    pub fn from_rating(rating: StarRating) -> Self {
        match rating {
            StarRating::Three => Self::Perfect,
            StarRating::Two => Self::Great,
            StarRating::One | StarRating::Zero => Self::KeepLearning,
        }
    }
}

/// Results screen data for a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResultsView {
    pub chapter_id: ChapterId,
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
    pub rating: StarRating,
    pub headline: ResultsHeadline,
    /// Next chapter in the catalog, if there is one to move on to.
    pub next_chapter: Option<ChapterId>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizResultsView {
    pub(crate) fn new(
        run: &QuizRun,
        rating: StarRating,
        completed_at: DateTime<Utc>,
        next_chapter: Option<ChapterId>,
    ) -> Self {
        let session = run.session();
        let correct = session.correct_count();
        let total = session.question_count();
        Self {
            chapter_id: run.chapter_id(),
            correct,
            total,
            percentage: percentage(correct, total),
            rating,
            headline: ResultsHeadline::from_rating(rating),
            next_chapter,
            started_at: run.started_at(),
            completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuizDefinition, StarThresholds};
    use quiz_core::time::fixed_now;
    use std::sync::Arc;

    fn build_run() -> QuizRun {
        let question = Question::new(
            "Which sensor uses lasers?",
            vec!["Radar".into(), "Lidar".into(), "Camera".into()],
            1,
            "Lidar measures distance with laser light.",
        )
        .unwrap();
        let quiz = QuizDefinition::new(ChapterId::new(2), vec![question])
            .unwrap()
            .with_title("Sensors");
        QuizRun::new(
            QuizSession::new(Arc::new(quiz), StarThresholds::default()),
            fixed_now(),
        )
    }

    #[test]
    fn unanswered_screen_is_all_idle() {
        let run = build_run();
        let screen = run.screen();

        assert_eq!(screen.question_number, 1);
        assert_eq!(screen.total_questions, 1);
        assert_eq!(screen.title.as_deref(), Some("Sensors"));
        assert!(screen.accepts_answer());
        assert!(screen.options.iter().all(|o| o.state == OptionState::Idle && !o.selected));
        let labels: Vec<_> = screen.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
    }

    #[test]
    fn wrong_pick_marks_pick_and_reveals_correct() {
        let mut run = build_run();
        run.session_mut().submit_answer(2).unwrap();
        let screen = run.screen();

        let states: Vec<_> = screen.options.iter().map(|o| o.state).collect();
        assert_eq!(
            states,
            [OptionState::Idle, OptionState::Correct, OptionState::Wrong]
        );
        assert!(screen.options[2].selected);
        assert!(!screen.accepts_answer());
        let feedback = screen.feedback.unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.explanation, "Lidar measures distance with laser light.");
    }

    #[test]
    fn right_pick_only_marks_correct() {
        let mut run = build_run();
        run.session_mut().submit_answer(1).unwrap();
        let screen = run.screen();

        let states: Vec<_> = screen.options.iter().map(|o| o.state).collect();
        assert_eq!(
            states,
            [OptionState::Idle, OptionState::Correct, OptionState::Idle]
        );
    }

    #[test]
    fn headline_follows_rating() {
        assert_eq!(ResultsHeadline::from_rating(StarRating::Three), ResultsHeadline::Perfect);
        assert_eq!(ResultsHeadline::from_rating(StarRating::Two), ResultsHeadline::Great);
        assert_eq!(ResultsHeadline::from_rating(StarRating::One), ResultsHeadline::KeepLearning);
        assert_eq!(ResultsHeadline::from_rating(StarRating::Zero), ResultsHeadline::KeepLearning);
    }
}
