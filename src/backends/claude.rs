//! Anthropic Messages API backend.

use almanac_core::error::{AlmanacError, AlmanacResult};
use almanac_core::generator::TextGenerator;
use almanac_core::prompt::Prompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::check_status;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

pub struct Claude {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl Claude {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        Claude {
            client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[async_trait]
impl TextGenerator for Claude {
    fn name(&self) -> &str {
        "claude"
    }

    async fn query(&self, prompt: &Prompt) -> AlmanacResult<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: &prompt.text,
            }],
        };

        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| AlmanacError::Query(format!("Claude request failed: {}", e)))?;

        let body: MessagesResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| AlmanacError::Query(format!("Unexpected Claude response: {}", e)))?;

        reply_text(body)
    }
}

fn reply_text(body: MessagesResponse) -> AlmanacResult<String> {
    body.content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| AlmanacError::Query("Claude response has no text content".into()))
}
