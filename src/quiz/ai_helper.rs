use async_trait::async_trait;
use chatgpt::client::ChatGPT;
use chatgpt::types::CompletionResponse;

use crate::config::Config;
use crate::quiz::{QuizError, QuizQuestion, OPTION_COUNT, QUESTION_COUNT};

/// Produces the batch of questions for one game.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn generate_questions(&self, topic: &str) -> Result<Vec<QuizQuestion>, QuizError>;
}

pub struct QuizHelper {
    chat_gpt: ChatGPT,
}

impl QuizHelper {
    pub fn new(chat_gpt: ChatGPT) -> Self {
        Self { chat_gpt }
    }

    pub fn from_config(config: &Config) -> Result<Self, QuizError> {
        let mut gpt = ChatGPT::new(config.api_key.clone())?;

        gpt.config.engine = config.model;
        gpt.config.temperature = 1.0;
        gpt.config.top_p = 0.95;
        gpt.config.timeout = config.request_timeout;

        Ok(Self::new(gpt))
    }
}

#[async_trait]
impl QuestionSource for QuizHelper {
    async fn generate_questions(&self, topic: &str) -> Result<Vec<QuizQuestion>, QuizError> {
        log::info!("Generating {} questions for topic {:?}", QUESTION_COUNT, topic);
        let prompt = build_prompt(topic);
        log::debug!("Prompt: {}", prompt);

        let response: CompletionResponse = self.chat_gpt.send_message(prompt).await?;
        let content = match response.message_choices.first() {
            Some(choice) => choice.message.content.clone(),
            None => return Err(QuizError::EmptyResponse),
        };

        log::debug!("Completion: {:?}", content);

        let questions = parse_questions(&content)?;
        log::info!("Received {} questions", questions.len());
        Ok(questions)
    }
}

pub fn build_prompt(topic: &str) -> String {
    format!(
        "Generate {count} latest quiz questions for the topic {topic} with {options} options each. \
Reply with a JSON array only, where every element has this format:
{{
    \"question\": \"Question text\",
    \"options\": [\"option1\", \"option2\", \"option3\", \"option4\"],
    \"answer\": correct_option_index
}}
The answer is the zero-based index of the correct option.",
        count = QUESTION_COUNT,
        topic = topic,
        options = OPTION_COUNT,
    )
}

/// Decodes a completion into questions. Models like to wrap JSON in a
/// Markdown fence, so that is stripped first. A single malformed question
/// rejects the whole batch.
pub fn parse_questions(content: &str) -> Result<Vec<QuizQuestion>, QuizError> {
    let questions: Vec<QuizQuestion> = serde_json::from_str(strip_code_fence(content))?;

    if questions.is_empty() {
        return Err(QuizError::InvalidQuestion {
            index: 0,
            reason: "the response contained no questions".to_string(),
        });
    }

    for (index, question) in questions.iter().enumerate() {
        if question.options.len() != OPTION_COUNT {
            return Err(QuizError::InvalidQuestion {
                index,
                reason: format!(
                    "expected {} options, got {}",
                    OPTION_COUNT,
                    question.options.len()
                ),
            });
        }
        if question.answer >= question.options.len() {
            return Err(QuizError::InvalidQuestion {
                index,
                reason: format!("answer index {} is out of range", question.answer),
            });
        }
    }

    Ok(questions)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", ...) on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
