//! Group documents: one JSON file per group in the config directory.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AlmanacError, AlmanacResult};

/// Something events are requested for (a festival, a set of holidays, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub name: String,

    /// Authoritative source the listing can be checked against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_url: Option<String>,

    /// Free-text hint appended to the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl Subject {
    pub fn new(name: &str) -> Self {
        Subject {
            name: name.to_string(),
            authority_url: None,
            additional_info: None,
        }
    }
}

/// A named collection of subjects sharing one text-generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_name: String,
    pub ai_provider: String,
    #[serde(default)]
    pub calendar_items: Vec<Subject>,
}

/// Load every `*.json` group document in `config_dir`, ordered by file name.
pub fn load_groups(config_dir: &Path) -> AlmanacResult<Vec<Group>> {
    let entries = std::fs::read_dir(config_dir).map_err(|e| {
        AlmanacError::Config(format!(
            "Could not read config directory {}: {}",
            config_dir.display(),
            e
        ))
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "json"))
        .collect();
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path).map_err(|e| {
                AlmanacError::Config(format!("Could not read {}: {}", path.display(), e))
            })?;
            let group: Group = serde_json::from_str(&content).map_err(|e| {
                AlmanacError::Config(format!("Invalid group document {}: {}", path.display(), e))
            })?;
            debug!(
                file = %path.display(),
                group = %group.group_name,
                subjects = group.calendar_items.len(),
                "loaded group"
            );
            Ok(group)
        })
        .collect()
}
