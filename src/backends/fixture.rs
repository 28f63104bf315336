//! Canned replies read from disk, one `<subject_slug>.txt` per subject.
//!
//! Used for offline runs and reproducible pipelines.

use std::path::PathBuf;

use almanac_core::error::{AlmanacError, AlmanacResult};
use almanac_core::generator::TextGenerator;
use almanac_core::naming::slug;
use almanac_core::prompt::Prompt;
use async_trait::async_trait;

pub struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    pub fn new(dir: PathBuf) -> Self {
        Fixture { dir }
    }

    fn path_for(&self, subject: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", slug(subject)))
    }
}

#[async_trait]
impl TextGenerator for Fixture {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn query(&self, prompt: &Prompt) -> AlmanacResult<String> {
        let path = self.path_for(&prompt.subject);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| AlmanacError::Query(format!("No fixture at {}: {}", path.display(), e)))
    }
}
