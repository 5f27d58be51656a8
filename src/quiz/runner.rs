use std::time::Duration;

use crate::input::LineInput;
use crate::presenter::{Presenter, Tone};
use crate::quiz::{Outcome, QuizQuestion, UserScore, OPTION_COUNT};

/// Asks each question once, in order, giving the player `answer_timeout` to reply.
pub struct QuizRunner<'a, P: Presenter> {
    presenter: &'a mut P,
    input: &'a mut LineInput,
    answer_timeout: Duration,
}

impl<'a, P: Presenter> QuizRunner<'a, P> {
    pub fn new(presenter: &'a mut P, input: &'a mut LineInput, answer_timeout: Duration) -> Self {
        Self {
            presenter,
            input,
            answer_timeout,
        }
    }

    pub async fn run(&mut self, name: &str, topic: &str, questions: &[QuizQuestion]) -> UserScore {
        let mut score = UserScore::new(name, topic);
        for (i, question) in questions.iter().enumerate() {
            let outcome = self.ask(i + 1, question).await;
            log::debug!("Question {} ended as {:?}", i + 1, outcome);
            score.record(outcome);
        }
        score
    }

    async fn ask(&mut self, number: usize, question: &QuizQuestion) -> Outcome {
        let stale = self.input.discard_pending();
        if stale > 0 {
            log::debug!("Dropped {} line(s) typed before question {} was shown", stale, number);
        }

        self.presenter.render(
            Tone::Heading,
            &format!("\nQuestion {}: {}\n", number, question.question),
        );
        for (j, option) in question.options.iter().enumerate() {
            self.presenter
                .render(Tone::Prompt, &format!("{}. {}\n", j + 1, option));
        }
        self.presenter.render(
            Tone::Prompt,
            &format!("\nEnter your answer (1-{}): ", OPTION_COUNT),
        );

        // Whichever finishes first decides the question. If the timer wins,
        // the next line typed still belongs to this question and is dropped.
        let line = match tokio::time::timeout(self.answer_timeout, self.input.next_answer()).await {
            Err(_elapsed) => {
                self.input.abandon_read();
                self.presenter
                    .render(Tone::Failure, "\nTime's up! Moving to next question\n");
                return Outcome::TimedOut;
            }
            Ok(None) => {
                self.presenter
                    .render(Tone::Failure, "\nError reading input: end of input\n");
                return Outcome::Errored;
            }
            Ok(Some(Err(err))) => {
                self.presenter
                    .render(Tone::Failure, &format!("\nError reading input: {}\n", err));
                return Outcome::Errored;
            }
            Ok(Some(Ok(line))) => line,
        };

        let given = match line.trim().parse::<i64>() {
            Ok(given) => given,
            Err(err) => {
                self.presenter
                    .render(Tone::Failure, &format!("\nError reading input: {}\n", err));
                return Outcome::Errored;
            }
        };

        let outcome = question.evaluate(given);
        match outcome {
            Outcome::Correct => self.presenter.render(Tone::Success, "Correct! +4 points\n"),
            Outcome::Wrong => self.presenter.render(Tone::Failure, "Wrong! -1 point\n"),
            Outcome::Skipped => self
                .presenter
                .render(Tone::Failure, "Invalid input. Skipping question.\n"),
            Outcome::TimedOut | Outcome::Errored => {
                unreachable!("evaluate only judges a parsed number")
            }
        }
        outcome
    }
}
