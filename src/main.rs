mod config;
mod game;
mod input;
mod lifecycle;
mod presenter;
mod quiz;

use config::Config;
use dotenv::dotenv;
use input::LineInput;
use presenter::{Presenter, TerminalPresenter, Tone};
use quiz::ai_helper::QuizHelper;
use quiz::store::QuestionStore;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if dotenv().is_err() {
        log::debug!("No .env file, using the process environment only");
    }

    let mut presenter = TerminalPresenter;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => fail(&mut presenter, err),
    };

    let store = QuestionStore::new(config.store_path.clone());
    lifecycle::spawn_cleanup_watcher(store.clone());
    log::info!("Starting quiz, questions will be kept in {}", store.path().display());

    let helper = match QuizHelper::from_config(&config) {
        Ok(helper) => helper,
        Err(err) => fail(&mut presenter, err),
    };

    let mut input = LineInput::stdin();
    match game::play(&helper, store, &mut presenter, &mut input, config.answer_timeout).await {
        Ok(score) => log::info!(
            "Quiz finished for {:?}: score {} in {} attempts",
            score.name,
            score.score,
            score.attempts
        ),
        Err(err) => fail(&mut presenter, err),
    }
}

fn fail(presenter: &mut impl Presenter, err: quiz::QuizError) -> ! {
    log::error!("{}", err);
    presenter.render(Tone::Failure, &format!("\n{}\n", err));
    std::process::exit(1);
}
