mod progress;
mod run;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use progress::QuizProgress;
pub use run::QuizRun;
pub use view::{OptionState, OptionView, QuizResultsView, QuizScreenView, ResultsHeadline};
pub use workflow::QuizLoopService;
