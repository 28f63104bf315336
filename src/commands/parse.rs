use std::path::Path;

use almanac_core::parse::parse_response;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::render::{pluralize, Render};

/// Run the response parser over a saved reply and show what it keeps.
pub fn run(file: &Path, subject: &str) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let parsed = parse_response(&raw, subject)?;

    println!(
        "{} {} for {}",
        parsed.events.len(),
        pluralize("event", parsed.events.len()),
        subject
    );
    for event in &parsed.events {
        println!("{}", event.render());
    }

    if !parsed.discarded.is_empty() {
        println!("\n{}", "Discarded:".dimmed());
        for line in &parsed.discarded {
            println!("{}", line.render());
        }
    }

    Ok(())
}
