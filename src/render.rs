//! Terminal rendering for almanac-core types, using owo_colors.

use almanac_core::event::EventRecord;
use almanac_core::ics::ParsedEntry;
use almanac_core::naming::CalendarScope;
use almanac_core::parse::DiscardedLine;
use almanac_core::pipeline::SubjectWarning;
use almanac_core::publish::Artifact;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventRecord {
    fn render(&self) -> String {
        let dates = if self.is_range() {
            format!("{} → {}", self.start_date(), self.end_date())
        } else {
            self.start_date().to_string()
        };
        format!("   {} {}", self.name(), dates.dimmed())
    }
}

impl Render for ParsedEntry {
    fn render(&self) -> String {
        let last = self.end_date();
        let dates = if last > self.start {
            format!("{} → {}", self.start, last)
        } else {
            self.start.to_string()
        };
        format!("   {} {} {}", self.summary, dates.dimmed(), self.uid.dimmed())
    }
}

impl Render for DiscardedLine {
    fn render(&self) -> String {
        format!(
            "   {} line {}: {} {}",
            "-".yellow(),
            self.line_number,
            self.text.trim(),
            format!("({})", self.reason).dimmed()
        )
    }
}

impl Render for SubjectWarning {
    fn render(&self) -> String {
        let who = match &self.subject {
            Some(subject) => format!("{} / {}", self.group, subject),
            None => self.group.clone(),
        };
        format!("   {} {}: {}", "!".yellow(), who, self.error.to_string().yellow())
    }
}

impl Render for Artifact {
    fn render(&self) -> String {
        let file = self
            .path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string());

        let label = match &self.scope {
            Some(CalendarScope::All) => "all events".to_string(),
            Some(scope) => scope.to_string(),
            None => "page".to_string(),
        };

        format!(
            "   {} {} {}",
            "+".green(),
            file.green(),
            format!("({}, {} {})", label, self.event_count, pluralize("event", self.event_count))
                .dimmed()
        )
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
