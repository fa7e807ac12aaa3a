use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct option {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Immutable once built: the prompt, the ordered options, the index of the
/// correct option and the explanation shown after answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl Question {
    /// Builds a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or an option is blank, there are
    /// fewer than two options, or `correct_index` does not point at an option.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len: options.len(),
            });
        }

        Ok(Self {
            prompt,
            options,
            correct_index,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Letter shown beside an option: `A`, `B`, `C`, ...
///
/// Past `Z` the 1-based position is used instead.
#[must_use]
pub fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Inverse of [`option_label`]: accepts a letter (any case) or a 1-based number.
#[must_use]
pub fn parse_option_label(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some(usize::from(c.to_ascii_uppercase() as u8 - b'A'));
        }
    }
    raw.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn builds_valid_question() {
        let q = Question::new(
            "What does a robotaxi use to see?",
            options(&["Cameras and sensors", "A map only"]),
            0,
            "Robotaxis combine cameras, radar and lidar.",
        )
        .unwrap();

        assert_eq!(q.option_count(), 2);
        assert!(q.is_correct(0));
        assert!(!q.is_correct(1));
        assert_eq!(q.option(1), Some("A map only"));
        assert_eq!(q.option(2), None);
    }

    #[test]
    fn rejects_blank_prompt() {
        let err = Question::new("  ", options(&["a", "b"]), 0, "").unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new("Q", options(&["only"]), 0, "").unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { len: 1 });
    }

    #[test]
    fn rejects_blank_option() {
        let err = Question::new("Q", options(&["a", " ", "c"]), 0, "").unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption { index: 1 });
    }

    #[test]
    fn rejects_correct_index_past_options() {
        let err = Question::new("Q", options(&["a", "b"]), 2, "").unwrap_err();
        assert_eq!(err, QuestionError::CorrectIndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn labels_options_with_letters() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(3), "D");
        assert_eq!(option_label(26), "27");
    }

    #[test]
    fn parses_letters_and_numbers() {
        assert_eq!(parse_option_label("a"), Some(0));
        assert_eq!(parse_option_label(" C "), Some(2));
        assert_eq!(parse_option_label("2"), Some(1));
        assert_eq!(parse_option_label("0"), None);
        assert_eq!(parse_option_label("?"), None);
        assert_eq!(parse_option_label(""), None);
    }
}
