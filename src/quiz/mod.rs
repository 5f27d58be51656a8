pub mod ai_helper;
pub mod error;
pub mod runner;
pub mod store;

pub use error::QuizError;

/// Number of questions requested from the chat model per game.
pub const QUESTION_COUNT: usize = 5;
/// Every question offers exactly this many options, answered as `1..=OPTION_COUNT`.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub answer: usize,
}

impl QuizQuestion {
    #[cfg(test)]
    pub fn new(question: impl Into<String>, options: Vec<String>, answer: usize) -> Self {
        Self {
            question: question.into(),
            options,
            answer,
        }
    }

    /// Judges a numeric answer typed by the player (one-based).
    pub fn evaluate(&self, given: i64) -> Outcome {
        if given < 1 || given > OPTION_COUNT as i64 {
            return Outcome::Skipped;
        }
        if (given - 1) as usize == self.answer {
            Outcome::Correct
        } else {
            Outcome::Wrong
        }
    }
}

/// How a single question ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong,
    TimedOut,
    /// The answer line could not be read or was not a number.
    Errored,
    /// A number outside `1..=OPTION_COUNT`. Neither scored nor counted as an attempt.
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserScore {
    pub name: String,
    pub topic: String,
    pub score: i64,
    pub attempts: u32,
}

impl UserScore {
    pub fn new(name: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            topic: topic.into(),
            score: 0,
            attempts: 0,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Correct => {
                self.attempts += 1;
                self.score += 4;
            }
            Outcome::Wrong | Outcome::TimedOut => {
                self.attempts += 1;
                self.score -= 1;
            }
            Outcome::Errored | Outcome::Skipped => {}
        }
    }
}
