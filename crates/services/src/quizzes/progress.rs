/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 0-based index of the question on screen.
    pub current: usize,
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub is_complete: bool,
}

impl QuizProgress {
    /// Fill level of a progress bar: the question on screen counts as reached.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_through(&self) -> f64 {
        if self.total == 0 || self.is_complete {
            return 100.0;
        }
        100.0 * (self.current + 1) as f64 / self.total as f64
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }
}
