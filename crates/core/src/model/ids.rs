use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies the chapter (or topic) a quiz belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChapterId(u64);

impl ChapterId {
    /// Creates a new `ChapterId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Debug for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChapterId({})", self.0)
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Error type for parsing an id from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse ChapterId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for ChapterId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ChapterId::new)
            .map_err(|_| ParseIdError { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_id_display_and_debug() {
        let id = ChapterId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(format!("{id:?}"), "ChapterId(7)");
        assert_eq!(format!("{id:>3}"), "  7");
    }

    #[test]
    fn chapter_id_from_str_trims_whitespace() {
        let id: ChapterId = " 3 ".parse().unwrap();
        assert_eq!(id, ChapterId::new(3));
    }

    #[test]
    fn chapter_id_from_str_invalid() {
        let err = "chapter-one".parse::<ChapterId>().unwrap_err();
        assert!(err.to_string().contains("chapter-one"));
    }
}
