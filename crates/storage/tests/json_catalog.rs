use std::io::Write;

use quiz_core::model::ChapterId;
use storage::repository::{InMemoryRepository, QuizRepository, Storage, StorageError};

const TWO_CHAPTERS: &str = r#"[
    {
        "chapterId": 2,
        "title": "Sensors",
        "questions": [
            {"question": "Which sensor uses lasers?", "options": ["Lidar", "Radar"], "correctAnswer": 0, "explanation": "Lidar is laser based."}
        ]
    },
    {
        "chapterId": 1,
        "questions": [
            {"question": "Is a robotaxi a car?", "options": ["Yes", "No"], "correctAnswer": 0},
            {"question": "Does it need a driver?", "options": ["Yes", "No"], "correctAnswer": 1}
        ]
    }
]"#;

#[tokio::test]
async fn loads_bundle_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(TWO_CHAPTERS.as_bytes()).expect("write bundle");

    let storage = Storage::from_json_file(file.path()).expect("load bundle");

    let chapters = storage.quizzes.list_chapters().await.unwrap();
    assert_eq!(chapters, vec![ChapterId::new(1), ChapterId::new(2)]);

    let quiz = storage.quizzes.get_quiz(ChapterId::new(1)).await.unwrap();
    assert_eq!(quiz.question_count(), 2);
    assert_eq!(quiz.question(1).unwrap().correct_index(), 1);

    let sensors = storage.quizzes.get_quiz(ChapterId::new(2)).await.unwrap();
    assert_eq!(sensors.title(), Some("Sensors"));
    assert_eq!(sensors.question(0).unwrap().explanation(), "Lidar is laser based.");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = InMemoryRepository::from_json_file(dir.path().join("nope.json"));
    assert!(matches!(result, Err(StorageError::Io(_))));
}

#[test]
fn invalid_question_fails_the_whole_bundle() {
    let raw = r#"[{"chapterId": 1, "questions": [
        {"question": "Pick one", "options": ["only"], "correctAnswer": 0}
    ]}]"#;

    let result = InMemoryRepository::from_json_str(raw);
    assert!(matches!(result, Err(StorageError::InvalidContent(_))));
}

#[tokio::test]
async fn unknown_chapter_in_bundle_is_not_found() {
    let repo = InMemoryRepository::from_json_str(TWO_CHAPTERS).unwrap();
    let err = repo.get_quiz(ChapterId::new(42)).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}
