use std::time::Duration;

use crate::input::LineInput;
use crate::presenter::{render_summary, Presenter, Tone};
use crate::quiz::ai_helper::QuestionSource;
use crate::quiz::runner::QuizRunner;
use crate::quiz::store::{QuestionStore, StoreGuard};
use crate::quiz::{QuizError, UserScore};

/// One full game: prompts, generation, persistence, quiz, summary.
/// The store file is gone when this returns, whether it succeeded or not.
pub async fn play<P: Presenter>(
    source: &impl QuestionSource,
    store: QuestionStore,
    presenter: &mut P,
    input: &mut LineInput,
    answer_timeout: Duration,
) -> Result<UserScore, QuizError> {
    let guard = StoreGuard::new(store);

    presenter.render(Tone::Prompt, "Enter your name: ");
    let name = input.read_trimmed().await;
    presenter.render(Tone::Prompt, "Enter the topic for quiz: ");
    let topic = input.read_trimmed().await;
    log::info!("Starting a quiz on {:?} for {:?}", topic, name);

    let questions = source.generate_questions(&topic).await?;
    guard.store().append(&questions)?;

    let score = QuizRunner::new(presenter, input, answer_timeout)
        .run(&name, &topic, &questions)
        .await;

    render_summary(presenter, &score);
    drop(guard);
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::RecordingPresenter;
    use crate::quiz::ai_helper::parse_questions;
    use crate::quiz::QuizQuestion;
    use async_trait::async_trait;
    use std::io;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    /// Replies with a fixed completion and remembers what it was asked,
    /// plus whether the store file existed at that moment.
    struct CannedSource {
        completion: &'static str,
        store_path: PathBuf,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl QuestionSource for CannedSource {
        async fn generate_questions(&self, topic: &str) -> Result<Vec<QuizQuestion>, QuizError> {
            assert!(!self.store_path.exists());
            self.seen.lock().unwrap().push(topic.to_string());
            parse_questions(self.completion)
        }
    }

    /// Checks the store file during the quiz.
    struct FileWitness {
        inner: RecordingPresenter,
        store_path: PathBuf,
        file_seen_during_quiz: bool,
    }

    impl Presenter for FileWitness {
        fn render(&mut self, tone: Tone, text: &str) {
            if text.starts_with("\nQuestion") && self.store_path.exists() {
                self.file_seen_during_quiz = true;
            }
            self.inner.render(tone, text);
        }
    }

    const ONE_QUESTION: &str = "```json\n[{\"question\": \"Capital of France?\", \"options\": [\"Paris\", \"Lyon\", \"Nice\", \"Tours\"], \"answer\": 0}]\n```";

    /// Name, topic and answers typed one second apart, each after its prompt.
    fn typed(lines: &[&str]) -> (LineInput, mpsc::Sender<io::Result<String>>) {
        LineInput::scripted(lines.iter().map(|line| Ok(line.to_string())).collect())
    }

    #[tokio::test(start_paused = true)]
    async fn full_game_scores_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quiz_data.json");
        let source = CannedSource {
            completion: ONE_QUESTION,
            store_path: path.clone(),
            seen: Mutex::new(Vec::new()),
        };
        let mut presenter = FileWitness {
            inner: RecordingPresenter::default(),
            store_path: path.clone(),
            file_seen_during_quiz: false,
        };
        let (mut input, _tx) = typed(&[" Ada ", "European capitals", "1"]);

        let score = play(
            &source,
            QuestionStore::new(&path),
            &mut presenter,
            &mut input,
            Duration::from_secs(30),
        )
        .await
        .unwrap();

        assert_eq!(score.name, "Ada");
        assert_eq!(score.topic, "European capitals");
        assert_eq!((score.score, score.attempts), (4, 1));
        assert_eq!(*source.seen.lock().unwrap(), vec!["European capitals".to_string()]);
        assert!(presenter.file_seen_during_quiz);
        assert!(presenter.inner.contains(Tone::Heading, "Final Results for Ada:"));
        assert!(presenter.inner.contains(Tone::Success, "Score: 4"));
        assert!(!path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn bad_completion_is_fatal_and_prints_no_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quiz_data.json");
        let source = CannedSource {
            completion: "I cannot help with that.",
            store_path: path.clone(),
            seen: Mutex::new(Vec::new()),
        };
        let mut presenter = RecordingPresenter::default();
        let (mut input, _tx) = typed(&["Ada", "nothing"]);

        let err = play(
            &source,
            QuestionStore::new(&path),
            &mut presenter,
            &mut input,
            Duration::from_secs(30),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, QuizError::Decode(_)));
        assert!(!presenter.text().contains("Final Results"));
        assert!(!path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn corrupt_leftover_file_is_fatal_and_removed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quiz_data.json");
        let source = CannedSource {
            completion: ONE_QUESTION,
            store_path: dir.path().join("unused.json"),
            seen: Mutex::new(Vec::new()),
        };
        std::fs::write(&path, "[{").unwrap();
        let mut presenter = RecordingPresenter::default();
        let (mut input, _tx) = typed(&["Ada", "capitals"]);

        let err = play(
            &source,
            QuestionStore::new(&path),
            &mut presenter,
            &mut input,
            Duration::from_secs(30),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, QuizError::Decode(_)));
        assert!(!path.exists());
    }
}
