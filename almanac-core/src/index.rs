//! Grouping of the global event set by group and by subject.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::Group;
use crate::error::{AlmanacError, AlmanacResult};
use crate::event::EventSet;
use crate::naming::CalendarScope;

/// One non-empty slice of the global event set, bound to a calendar file.
#[derive(Debug, Clone)]
pub struct Partition {
    pub scope: CalendarScope,
    pub events: EventSet,
}

/// Read-only view over the global event set and the configured groups.
pub struct EventIndex<'a> {
    events: &'a EventSet,
    groups: &'a [Group],
}

impl<'a> EventIndex<'a> {
    pub fn new(events: &'a EventSet, groups: &'a [Group]) -> Self {
        EventIndex { events, groups }
    }

    /// Events attributed to `group`, or `None` when there is nothing to emit.
    pub fn by_group(&self, group: &str) -> Option<EventSet> {
        non_empty(self.events.filtered(|e| e.group() == group))
    }

    /// Events generated for `subject` in any group, or `None` when there is nothing to emit.
    pub fn by_subject(&self, subject: &str) -> Option<EventSet> {
        non_empty(self.events.filtered(|e| e.subject() == subject))
    }

    pub fn by_scope(&self, scope: &CalendarScope) -> Option<EventSet> {
        match scope {
            CalendarScope::All => non_empty(self.events.clone()),
            CalendarScope::Group { group } => self.by_group(group),
            CalendarScope::Subject { group, subject } => non_empty(
                self.events
                    .filtered(|e| e.group() == group && e.subject() == subject),
            ),
        }
    }

    /// Every scope that would be emitted, in config order: all events first,
    /// then each group followed by its subjects. Repeated scopes are listed once.
    pub fn scopes(&self) -> Vec<CalendarScope> {
        let mut seen = HashSet::new();
        let mut scopes = vec![CalendarScope::All];

        for group in self.groups {
            scopes.push(CalendarScope::group(&group.group_name));
            for subject in &group.calendar_items {
                scopes.push(CalendarScope::subject(&group.group_name, &subject.name));
            }
        }

        scopes.retain(|scope| seen.insert(scope.clone()));
        scopes
    }

    /// Non-empty partitions for every scope.
    ///
    /// Fails when two different scopes would be written to the same file,
    /// e.g. a group named `All` or subjects that only differ in case.
    pub fn partitions(&self) -> AlmanacResult<Vec<Partition>> {
        let mut files: HashMap<String, CalendarScope> = HashMap::new();
        let mut partitions = Vec::new();

        for scope in self.scopes() {
            let Some(events) = self.by_scope(&scope) else {
                debug!(%scope, "no events, no file to emit");
                continue;
            };

            let file = scope.file_name();
            if let Some(first) = files.get(&file) {
                return Err(AlmanacError::FileNameCollision {
                    file,
                    first: first.to_string(),
                    second: scope.to_string(),
                });
            }
            files.insert(file, scope.clone());
            partitions.push(Partition { scope, events });
        }

        Ok(partitions)
    }
}

fn non_empty(events: EventSet) -> Option<EventSet> {
    if events.is_empty() {
        None
    } else {
        Some(events)
    }
}
