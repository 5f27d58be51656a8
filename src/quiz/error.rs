use thiserror::Error;

/// Everything that ends a game early. Per-question trouble is an
/// [`Outcome`](super::Outcome), never one of these.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("chat request failed: {0}")]
    ChatGpt(#[from] chatgpt::err::Error),
    #[error("no candidates found in response")]
    EmptyResponse,
    #[error("malformed question JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("question {index} is unusable: {reason}")]
    InvalidQuestion { index: usize, reason: String },
    #[error("question store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
