use async_trait::async_trait;
use quiz_core::model::{ChapterId, QuizDefinition};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json;

/// Errors surfaced by content adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("i/o error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid content: {0}")]
    InvalidContent(String),
}

/// Read-only source of quiz definitions keyed by chapter.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Fetch the quiz for a chapter.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the chapter has no quiz, or other storage errors.
    async fn get_quiz(&self, chapter_id: ChapterId) -> Result<Arc<QuizDefinition>, StorageError>;

    /// All chapters that have a quiz, ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_chapters(&self) -> Result<Vec<ChapterId>, StorageError>;
}

/// Quiz content held in memory, usually loaded from a JSON bundle at startup.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    quizzes: Arc<Mutex<BTreeMap<ChapterId, Arc<QuizDefinition>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Build a repository from a JSON content bundle.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON and
    /// `StorageError::InvalidContent` for quizzes that fail validation.
    pub fn from_json_str(raw: &str) -> Result<Self, StorageError> {
        let repo = Self::new();
        for quiz in json::parse_bundle(raw)? {
            repo.upsert_quiz(quiz)?;
        }
        Ok(repo)
    }

    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read, otherwise as
    /// [`InMemoryRepository::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StorageError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// The sample robotaxi chapters compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bundled content fails to parse.
    pub fn bundled() -> Result<Self, StorageError> {
        Self::from_json_str(json::BUNDLED_QUIZZES)
    }

    /// Insert or replace the quiz for its chapter.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn upsert_quiz(&self, quiz: QuizDefinition) -> Result<(), StorageError> {
        let mut guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(quiz.chapter_id(), Arc::new(quiz));
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn get_quiz(&self, chapter_id: ChapterId) -> Result<Arc<QuizDefinition>, StorageError> {
        let guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&chapter_id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_chapters(&self) -> Result<Vec<ChapterId>, StorageError> {
        let guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.keys().copied().collect())
    }
}

/// Aggregates the content repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
}

impl Storage {
    /// # Errors
    ///
    /// Returns `StorageError` if the bundled content fails to parse.
    pub fn bundled() -> Result<Self, StorageError> {
        Ok(Self::from_repository(InMemoryRepository::bundled()?))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the bundle cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::from_repository(InMemoryRepository::from_json_file(path)?))
    }

    fn from_repository(repo: InMemoryRepository) -> Self {
        let quizzes: Arc<dyn QuizRepository> = Arc::new(repo);
        Self { quizzes }
    }
}
