use std::{path::PathBuf, time::Duration};

use chatgpt::config::ChatGPTEngine;

use crate::quiz::QuizError;

pub const DEFAULT_STORE_PATH: &str = "quiz_data.json";
pub const DEFAULT_ANSWER_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: ChatGPTEngine,
    pub answer_timeout: Duration,
    pub request_timeout: Duration,
    pub store_path: PathBuf,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, QuizError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, QuizError> {
        let api_key = lookup("CHATGPT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| QuizError::Config("CHATGPT_API_KEY is not set".to_string()))?;

        let model = match lookup("QUIZ_MODEL") {
            Some(name) => parse_engine(&name)?,
            None => ChatGPTEngine::Gpt35Turbo,
        };

        let answer_timeout = seconds(&lookup, "QUIZ_ANSWER_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_ANSWER_TIMEOUT);
        let request_timeout = seconds(&lookup, "QUIZ_REQUEST_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let store_path = lookup("QUIZ_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        Ok(Self {
            api_key,
            model,
            answer_timeout,
            request_timeout,
            store_path,
        })
    }
}

fn parse_engine(name: &str) -> Result<ChatGPTEngine, QuizError> {
    match name.trim() {
        "gpt-3.5-turbo" => Ok(ChatGPTEngine::Gpt35Turbo),
        "gpt-4" => Ok(ChatGPTEngine::Gpt4),
        "gpt-4-32k" => Ok(ChatGPTEngine::Gpt4_32k),
        other => Err(QuizError::Config(format!("unknown model '{}'", other))),
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Duration>, QuizError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(QuizError::Config(format!("{} must be greater than zero", key))),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
        Err(_) => Err(QuizError::Config(format!(
            "{} must be a whole number of seconds, got '{}'",
            key, raw
        ))),
    }
}
