//! Output artifact naming.
//!
//! File names are a pure function of group and subject names, so re-running
//! with the same configuration overwrites the same paths. Per-subject files
//! are prefixed with their group's slug.

use std::fmt;

pub const ALL_EVENTS_FILE: &str = "all_events.ics";
pub const PAGE_FILE: &str = "index.html";

const ALL_EVENTS_DISPLAY_NAME: &str = "All Events";

/// Lowercase form of `name` with spaces (and path separators) replaced by underscores.
pub fn slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace([' ', '/', '\\'], "_")
}

/// Which slice of the global event set a calendar file holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CalendarScope {
    All,
    Group { group: String },
    Subject { group: String, subject: String },
}

impl CalendarScope {
    pub fn group(group: &str) -> Self {
        CalendarScope::Group {
            group: group.to_string(),
        }
    }

    pub fn subject(group: &str, subject: &str) -> Self {
        CalendarScope::Subject {
            group: group.to_string(),
            subject: subject.to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        match self {
            CalendarScope::All => ALL_EVENTS_FILE.to_string(),
            CalendarScope::Group { group } => format!("{}_events.ics", slug(group)),
            CalendarScope::Subject { group, subject } => {
                format!("{}_{}_events.ics", slug(group), slug(subject))
            }
        }
    }

    /// Name the calendar is published under.
    pub fn display_name(&self) -> &str {
        match self {
            CalendarScope::All => ALL_EVENTS_DISPLAY_NAME,
            CalendarScope::Group { group } => group,
            CalendarScope::Subject { subject, .. } => subject,
        }
    }
}

impl fmt::Display for CalendarScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarScope::All => write!(f, "all events"),
            CalendarScope::Group { group } => write!(f, "group {}", group),
            CalendarScope::Subject { group, subject } => write!(f, "{} / {}", group, subject),
        }
    }
}
