//! The text-generation capability.
//!
//! Backends (OpenAI, Claude, canned fixtures, ...) live outside the core; the
//! pipeline only ever sees this trait, and every reply goes through the same
//! response parser.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AlmanacResult;
use crate::prompt::Prompt;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier used in logs ("openai", "claude", ...)
    fn name(&self) -> &str;

    /// Send `prompt` and return the raw reply text.
    async fn query(&self, prompt: &Prompt) -> AlmanacResult<String>;
}

/// Maps a group's `aiProvider` string to a backend.
pub trait GeneratorResolver {
    fn resolve(&self, provider: &str) -> AlmanacResult<Arc<dyn TextGenerator>>;
}

impl<F> GeneratorResolver for F
where
    F: Fn(&str) -> AlmanacResult<Arc<dyn TextGenerator>>,
{
    fn resolve(&self, provider: &str) -> AlmanacResult<Arc<dyn TextGenerator>> {
        self(provider)
    }
}
