//! Text-generation backends, selected by a group's `aiProvider` string.

mod claude;
mod fixture;
mod openai;

use std::path::PathBuf;
use std::sync::Arc;

use almanac_core::error::{AlmanacError, AlmanacResult};
use almanac_core::generator::{GeneratorResolver, TextGenerator};

pub use claude::Claude;
pub use fixture::Fixture;
pub use openai::OpenAi;

use crate::settings::Settings;

/// Everything needed to build any backend.
pub struct Backends {
    client: reqwest::Client,
    api_key: Option<String>,
    model: Option<String>,
    openai_base_url: Option<String>,
    anthropic_base_url: Option<String>,
    fixtures_dir: Option<PathBuf>,
}

impl Backends {
    pub fn from_settings(settings: &Settings) -> Self {
        Backends {
            client: reqwest::Client::new(),
            api_key: settings.ai_api_key.clone(),
            model: settings.ai_model.clone(),
            openai_base_url: settings.openai_base_url.clone(),
            anthropic_base_url: settings.anthropic_base_url.clone(),
            fixtures_dir: settings.fixtures_dir.clone(),
        }
    }

    fn api_key(&self, provider: &str) -> AlmanacResult<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AlmanacError::Config(format!("AI_API_KEY must be set to use provider '{}'", provider))
            })
    }
}

impl GeneratorResolver for Backends {
    fn resolve(&self, provider: &str) -> AlmanacResult<Arc<dyn TextGenerator>> {
        match provider {
            "openai" => Ok(Arc::new(OpenAi::new(
                self.client.clone(),
                self.api_key(provider)?,
                self.model.clone(),
                self.openai_base_url.clone(),
            ))),
            "claude" => Ok(Arc::new(Claude::new(
                self.client.clone(),
                self.api_key(provider)?,
                self.model.clone(),
                self.anthropic_base_url.clone(),
            ))),
            "fixture" => {
                let dir = self.fixtures_dir.clone().ok_or_else(|| {
                    AlmanacError::Config("FIXTURES_DIR must be set to use provider 'fixture'".into())
                })?;
                Ok(Arc::new(Fixture::new(dir)))
            }
            other => Err(AlmanacError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Turn a non-success HTTP response into a query error carrying the body.
async fn check_status(response: reqwest::Response) -> AlmanacResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AlmanacError::Query(format!("HTTP {}: {}", status, body.trim())))
}
