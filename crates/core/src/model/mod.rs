mod ids;
mod question;
mod quiz;
mod rating;
mod session;

pub use ids::{ChapterId, ParseIdError};
pub use question::{Question, QuestionError, option_label, parse_option_label};
pub use quiz::{QuizDefinition, QuizDefinitionError};
pub use rating::{StarRating, StarThresholds, StarThresholdsError, THREE_STAR_PERCENT, percentage};
pub use session::{Advance, AnswerFeedback, QuizSession, QuizSessionError, SessionState};
