//! Line-oriented quiz front end over any `BufRead`/`Write` pair.

use std::io::{BufRead, Write};

use quiz_core::model::{ChapterId, option_label, parse_option_label};
use services::{
    OptionState, QuizError, QuizLoopService, QuizResultsView, QuizRun, QuizScreenView,
    ResultsHeadline,
};
use storage::repository::QuizRepository;

type TerminalResult<T> = Result<T, Box<dyn std::error::Error>>;

/// What the learner picked on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextStep {
    Retry,
    NextChapter(ChapterId),
    Quit,
}

/// Reads one trimmed line; `None` on end of input.
fn read_line(input: &mut impl BufRead) -> TerminalResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub(crate) async fn list_chapters(
    quizzes: &dyn QuizRepository,
    out: &mut impl Write,
) -> TerminalResult<()> {
    for chapter_id in quizzes.list_chapters().await? {
        let quiz = quizzes.get_quiz(chapter_id).await?;
        let count = quiz.question_count();
        writeln!(
            out,
            "{chapter_id:>3}  {}  ({count} {})",
            quiz.title().unwrap_or("Untitled"),
            if count == 1 { "question" } else { "questions" }
        )?;
    }
    Ok(())
}

/// Runs quizzes until the learner quits or input ends.
pub(crate) async fn play(
    service: &QuizLoopService,
    chapter_id: ChapterId,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> TerminalResult<()> {
    let mut run = match service.start_quiz(chapter_id).await {
        Ok(run) => run,
        Err(QuizError::NotFound(_)) => {
            writeln!(out, "Quiz not found")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    loop {
        if !answer_all(service, &mut run, input, out)? {
            return Ok(());
        }

        let results = service.results(&run).await?;
        render_results(&results, out)?;

        match ask_next_step(&results, input, out)? {
            NextStep::Retry => run = service.retry(&run),
            NextStep::NextChapter(next) => run = service.start_quiz(next).await?,
            NextStep::Quit => return Ok(()),
        }
    }
}

/// Walks the run to completion. Returns `false` if input ended first.
fn answer_all(
    service: &QuizLoopService,
    run: &mut QuizRun,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> TerminalResult<bool> {
    while !run.is_complete() {
        let screen = run.screen();
        render_question(&screen, out)?;

        let choice = loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(false);
            };
            match parse_option_label(&line) {
                Some(index) if index < screen.options.len() => break index,
                _ => writeln!(
                    out,
                    "Pick one of A-{}.",
                    option_label(screen.options.len() - 1)
                )?,
            }
        };

        service.answer(run, choice)?;
        render_feedback(&run.screen(), out)?;

        write!(out, "Press Enter to continue ")?;
        out.flush()?;
        if read_line(input)?.is_none() {
            return Ok(false);
        }
        service.advance(run)?;
    }
    Ok(true)
}

fn render_question(screen: &QuizScreenView, out: &mut impl Write) -> TerminalResult<()> {
    writeln!(out)?;
    if let Some(title) = &screen.title {
        writeln!(out, "{title}")?;
    }
    writeln!(
        out,
        "Question {} of {}  {}",
        screen.question_number,
        screen.total_questions,
        progress_bar(screen.progress.percent_through())
    )?;
    writeln!(out, "{}", screen.prompt)?;
    for option in &screen.options {
        writeln!(out, "  {}) {}", option.label, option.text)?;
    }
    Ok(())
}

const PROGRESS_BAR_WIDTH: usize = 10;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

fn render_feedback(screen: &QuizScreenView, out: &mut impl Write) -> TerminalResult<()> {
    let Some(feedback) = &screen.feedback else {
        return Ok(());
    };
    for option in &screen.options {
        let mark = match option.state {
            OptionState::Correct => "✓",
            OptionState::Wrong => "✗",
            OptionState::Idle => " ",
        };
        writeln!(out, "{mark} {}) {}", option.label, option.text)?;
    }
    writeln!(
        out,
        "{}",
        if feedback.is_correct { "Correct!" } else { "Not quite." }
    )?;
    if !feedback.explanation.is_empty() {
        writeln!(out, "{}", feedback.explanation)?;
    }
    Ok(())
}

fn headline_text(headline: ResultsHeadline) -> &'static str {
    match headline {
        ResultsHeadline::Perfect => "Perfect!",
        ResultsHeadline::Great => "Great job!",
        ResultsHeadline::KeepLearning => "Keep learning!",
    }
}

fn render_results(results: &QuizResultsView, out: &mut impl Write) -> TerminalResult<()> {
    writeln!(out)?;
    writeln!(out, "{}  {}", results.rating, headline_text(results.headline))?;
    writeln!(
        out,
        "You got {} out of {} correct",
        results.correct, results.total
    )?;
    Ok(())
}

fn ask_next_step(
    results: &QuizResultsView,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> TerminalResult<NextStep> {
    loop {
        match results.next_chapter {
            Some(_) => write!(out, "[r] try again  [n] next chapter  [q] quit > ")?,
            None => write!(out, "[r] try again  [q] quit > ")?,
        }
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(NextStep::Quit);
        };
        match (line.to_ascii_lowercase().as_str(), results.next_chapter) {
            ("r", _) => return Ok(NextStep::Retry),
            ("n", Some(next)) => return Ok(NextStep::NextChapter(next)),
            ("q", _) => return Ok(NextStep::Quit),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;
    use services::Clock;
    use std::io::Cursor;
    use std::sync::Arc;
    use storage::repository::InMemoryRepository;

    const BUNDLE: &str = r#"[
        {"chapterId": 1, "title": "Roads", "questions": [
            {"question": "Red light means?", "options": ["Stop", "Go"], "correctAnswer": 0, "explanation": "Red means stop."},
            {"question": "Green light means?", "options": ["Stop", "Go"], "correctAnswer": 1}
        ]},
        {"chapterId": 2, "questions": [
            {"question": "Who buckles up?", "options": ["Everyone", "Nobody"], "correctAnswer": 0}
        ]}
    ]"#;

    fn service() -> QuizLoopService {
        let repo = InMemoryRepository::from_json_str(BUNDLE).unwrap();
        QuizLoopService::new(Clock::fixed(fixed_now()), Arc::new(repo))
    }

    async fn play_script(chapter: u64, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        play(&service(), ChapterId::new(chapter), &mut input, &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn unknown_chapter_prints_not_found() {
        let output = play_script(9, "").await;
        assert_eq!(output.trim(), "Quiz not found");
    }

    #[tokio::test]
    async fn perfect_run_then_quit() {
        let output = play_script(1, "a\n\nB\n\nq\n").await;
        assert!(output.contains("Question 1 of 2  [#####-----]"));
        assert!(output.contains("Question 2 of 2  [##########]"));
        assert!(output.contains("Red means stop."));
        assert!(output.contains("★★★  Perfect!"));
        assert!(output.contains("You got 2 out of 2 correct"));
        assert!(output.contains("[n] next chapter"));
    }

    #[tokio::test]
    async fn invalid_choice_is_asked_again() {
        let output = play_script(2, "z\n1\n\nq\n").await;
        assert!(output.contains("Pick one of A-B."));
        assert!(output.contains("You got 1 out of 1 correct"));
        assert!(!output.contains("next chapter"));
    }

    #[tokio::test]
    async fn retry_and_next_chapter() {
        let output = play_script(1, "b\n\nb\n\nr\na\n\nb\n\nn\na\n\nq\n").await;
        assert!(output.contains("You got 1 out of 2 correct"));
        assert!(output.contains("You got 2 out of 2 correct"));
        assert!(output.contains("Who buckles up?"));
    }

    #[tokio::test]
    async fn end_of_input_stops_quietly() {
        let output = play_script(1, "a\n").await;
        assert!(output.contains("Correct!"));
        assert!(!output.contains("out of"));
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0), "[----------]");
        assert_eq!(progress_bar(100.0 / 3.0), "[###-------]");
        assert_eq!(progress_bar(100.0), "[##########]");
        assert_eq!(progress_bar(150.0), "[##########]");
    }

    #[tokio::test]
    async fn lists_chapters_with_titles() {
        let repo = InMemoryRepository::from_json_str(BUNDLE).unwrap();
        let mut out = Vec::new();
        list_chapters(&repo, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  1  Roads  (2 questions)"));
        assert!(text.contains("  2  Untitled  (1 question)"));
    }
}
