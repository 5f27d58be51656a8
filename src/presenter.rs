use std::io::Write;

use crossterm::style::{style, Stylize};

use crate::quiz::UserScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Prompt,
    Heading,
    Success,
    Failure,
}

/// Where the game's text goes. Text is written verbatim, newlines included.
pub trait Presenter {
    fn render(&mut self, tone: Tone, text: &str);
}

/// Colored stdout.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn render(&mut self, tone: Tone, text: &str) {
        let styled = match tone {
            Tone::Prompt => style(text).cyan(),
            Tone::Heading => style(text).yellow(),
            Tone::Success => style(text).green().bold(),
            Tone::Failure => style(text).red().bold(),
        };
        let mut stdout = std::io::stdout().lock();
        // Prompts have no trailing newline, so flush every time.
        if let Err(err) = write!(stdout, "{}", styled).and_then(|_| stdout.flush()) {
            log::warn!("Failed to write to stdout: {}", err);
        }
    }
}

pub fn render_summary(presenter: &mut impl Presenter, score: &UserScore) {
    presenter.render(
        Tone::Heading,
        &format!("\nFinal Results for {}:\n", score.name),
    );
    presenter.render(Tone::Heading, &format!("Topic: {}\n", score.topic));
    let tone = if score.score > 0 {
        Tone::Success
    } else {
        Tone::Failure
    };
    presenter.render(tone, &format!("Score: {}\n", score.score));
    presenter.render(
        Tone::Heading,
        &format!("Total Attempts: {}\n", score.attempts),
    );
}

/// Keeps everything rendered, for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub lines: Vec<(Tone, String)>,
}

#[cfg(test)]
impl RecordingPresenter {
    pub fn contains(&self, tone: Tone, needle: &str) -> bool {
        self.lines
            .iter()
            .any(|(t, text)| *t == tone && text.contains(needle))
    }

    pub fn text(&self) -> String {
        self.lines.iter().map(|(_, text)| text.as_str()).collect()
    }
}

#[cfg(test)]
impl Presenter for RecordingPresenter {
    fn render(&mut self, tone: Tone, text: &str) {
        self.lines.push((tone, text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_score_is_green() {
        let mut presenter = RecordingPresenter::default();
        let score = UserScore {
            name: "Ada".into(),
            topic: "Rust".into(),
            score: 4,
            attempts: 1,
        };
        render_summary(&mut presenter, &score);

        assert_eq!(
            presenter.text(),
            "\nFinal Results for Ada:\nTopic: Rust\nScore: 4\nTotal Attempts: 1\n"
        );
        assert!(presenter.contains(Tone::Success, "Score: 4"));
    }

    #[test]
    fn zero_and_negative_scores_are_red() {
        for value in [0, -3] {
            let mut presenter = RecordingPresenter::default();
            let score = UserScore {
                score: value,
                ..UserScore::new("Ada", "Rust")
            };
            render_summary(&mut presenter, &score);
            assert!(presenter.contains(Tone::Failure, &format!("Score: {}", value)));
        }
    }
}
