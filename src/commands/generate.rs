use anyhow::{Context, Result};
use almanac_core::config::load_groups;
use almanac_core::pipeline::{self, RunReport};
use almanac_core::publish::publish;
use chrono::Utc;
use owo_colors::OwoColorize;
use tracing::info;

use crate::backends::Backends;
use crate::render::{pluralize, Render};
use crate::settings::Settings;
use crate::utils::tui::create_spinner;

pub async fn run(settings: Settings) -> Result<()> {
    let groups = load_groups(&settings.config_dir)
        .with_context(|| format!("Failed to load groups from {}", settings.config_dir.display()))?;
    let subjects: usize = groups.iter().map(|g| g.calendar_items.len()).sum();
    info!(groups = groups.len(), subjects, "loaded group configs");

    let year = settings.year();

    let report = if settings.disable_ai {
        info!("AI queries are disabled, skipping AI calls");
        RunReport::default()
    } else {
        let backends = Backends::from_settings(&settings);
        let spinner = create_spinner(format!(
            "Querying {} {} for {}",
            subjects,
            pluralize("subject", subjects),
            year
        ));
        let report = pipeline::collect(&groups, &backends, year, settings.max_concurrency).await;
        spinner.finish_and_clear();
        report
    };

    if !report.warnings.is_empty() {
        println!(
            "{}",
            format!(
                "{} {}:",
                report.warnings.len(),
                pluralize("warning", report.warnings.len())
            )
            .yellow()
        );
        for warning in &report.warnings {
            println!("{}", warning.render());
        }
        println!();
    }

    println!(
        "Collected {} unique {} ({} parsed) from {} {}",
        report.events.len(),
        pluralize("event", report.events.len()),
        report.events_parsed,
        report.subjects_queried,
        pluralize("subject", report.subjects_queried)
    );

    let artifacts = publish(&settings.output_dir, &report.events, &groups, Utc::now())
        .with_context(|| format!("Failed to publish to {}", settings.output_dir.display()))?;

    if report.events.is_empty() {
        println!("{}", "No events, no calendars written.".dimmed());
    }

    println!("\nWrote {}:", settings.output_dir.display());
    for artifact in &artifacts {
        println!("{}", artifact.render());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn settings(root: &Path, disable_ai: bool) -> Settings {
        Settings {
            ai_api_key: None,
            ai_model: None,
            disable_ai,
            config_dir: root.join("configs"),
            output_dir: root.join("docs"),
            max_concurrency: 2,
            year: Some(2025),
            fixtures_dir: Some(root.join("fixtures")),
            openai_base_url: None,
            anthropic_base_url: None,
        }
    }

    fn seed(root: &Path) {
        std::fs::create_dir_all(root.join("configs")).unwrap();
        std::fs::create_dir_all(root.join("fixtures")).unwrap();
        std::fs::write(
            root.join("configs/festivals.json"),
            r#"{"groupName": "Hindu Festivals", "aiProvider": "fixture",
                "calendarItems": [{"name": "Diwali"}, {"name": "Missing Fixture"}]}"#,
        )
        .unwrap();
        std::fs::write(root.join("fixtures/diwali.txt"), "Diwali: 2025-10-20\n").unwrap();
    }

    #[tokio::test]
    async fn test_generate_with_fixture_backend() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());

        run(settings(dir.path(), false)).await.unwrap();

        let docs = dir.path().join("docs");
        assert!(docs.join("all_events.ics").exists());
        assert!(docs.join("hindu_festivals_events.ics").exists());
        assert!(docs.join("hindu_festivals_diwali_events.ics").exists());
        assert!(!docs.join("hindu_festivals_missing_fixture_events.ics").exists());
        assert!(docs.join("index.html").exists());
    }

    #[tokio::test]
    async fn test_disabled_ai_writes_only_the_page() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());

        run(settings(dir.path(), true)).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path().join("docs"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["index.html"]);
    }

    #[tokio::test]
    async fn test_missing_config_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();

        assert!(run(settings(dir.path(), false)).await.is_err());
    }
}
