#![forbid(unsafe_code)]

pub mod error;
pub mod quizzes;

pub use quiz_core::Clock;

pub use error::QuizError;
pub use quizzes::{
    OptionState, OptionView, QuizLoopService, QuizProgress, QuizResultsView, QuizRun,
    QuizScreenView, ResultsHeadline,
};
