//! OpenAI Chat Completions backend.

use almanac_core::error::{AlmanacError, AlmanacResult};
use almanac_core::generator::TextGenerator;
use almanac_core::prompt::Prompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::check_status;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 4000;
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub struct OpenAi {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAi {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        OpenAi {
            client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[async_trait]
impl TextGenerator for OpenAi {
    fn name(&self) -> &str {
        "openai"
    }

    async fn query(&self, prompt: &Prompt) -> AlmanacResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.text,
                },
            ],
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AlmanacError::Query(format!("OpenAI request failed: {}", e)))?;

        let body: ChatResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| AlmanacError::Query(format!("Unexpected OpenAI response: {}", e)))?;

        reply_text(body)
    }
}

fn reply_text(body: ChatResponse) -> AlmanacResult<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AlmanacError::Query("OpenAI response has no choices".into()))
}
