use std::path::Path;

use almanac_core::ics::read_calendar_events;
use anyhow::{Context, Result};

use crate::render::{pluralize, Render};

pub fn run(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let entries = read_calendar_events(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    println!(
        "{}: {} {}",
        file.display(),
        entries.len(),
        pluralize("event", entries.len())
    );
    for entry in &entries {
        println!("{}", entry.render());
    }

    Ok(())
}
