//! Writing every artifact of a run into the output directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::Group;
use crate::error::{AlmanacError, AlmanacResult};
use crate::event::EventSet;
use crate::ics::CalendarFile;
use crate::index::EventIndex;
use crate::naming::{CalendarScope, PAGE_FILE};
use crate::page::compose;

/// A file written by [`publish`].
#[derive(Debug, Clone)]
pub struct Artifact {
    /// `None` for the index page
    pub scope: Option<CalendarScope>,
    pub path: PathBuf,
    pub event_count: usize,
}

/// Write the global, per-group and per-subject calendars plus the index page.
///
/// Every calendar is rendered before anything is written. The first failed
/// write aborts the rest. Calendars are only written for non-empty scopes;
/// the page is always written.
pub fn publish(
    out_dir: &Path,
    events: &EventSet,
    groups: &[Group],
    stamp: DateTime<Utc>,
) -> AlmanacResult<Vec<Artifact>> {
    if events.is_empty() {
        info!("no events to publish, writing the page only");
    }

    let index = EventIndex::new(events, groups);
    let calendars = index
        .partitions()?
        .iter()
        .map(|partition| CalendarFile::emit(&partition.events, &partition.scope, stamp))
        .collect::<AlmanacResult<Vec<_>>>()?;

    std::fs::create_dir_all(out_dir).map_err(|source| AlmanacError::FileWrite {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut artifacts = Vec::with_capacity(calendars.len() + 1);

    for calendar in calendars {
        let path = write_file(out_dir, &calendar.file_name, &calendar.content)?;
        debug!(path = %path.display(), events = calendar.event_count, "wrote calendar");
        artifacts.push(Artifact {
            scope: Some(calendar.scope),
            path,
            event_count: calendar.event_count,
        });
    }

    let path = write_file(out_dir, PAGE_FILE, &compose(events, groups))?;
    artifacts.push(Artifact {
        scope: None,
        path,
        event_count: events.len(),
    });

    info!(files = artifacts.len(), dir = %out_dir.display(), "published");

    Ok(artifacts)
}

fn write_file(dir: &Path, file_name: &str, content: &str) -> AlmanacResult<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, content).map_err(|source| AlmanacError::FileWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Subject;
    use crate::event::EventRecord;
    use chrono::NaiveDate;

    fn groups() -> Vec<Group> {
        vec![Group {
            group_name: "Hindu Festivals".to_string(),
            ai_provider: "fixture".to_string(),
            calendar_items: vec![Subject::new("Diwali"), Subject::new("Holi")],
        }]
    }

    fn events() -> EventSet {
        let date = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        EventSet::from(vec![EventRecord::new("Diwali", date, date, "Diwali")
            .unwrap()
            .with_group("Hindu Festivals")])
    }

    #[test]
    fn test_publish_writes_expected_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("docs");

        let artifacts = publish(&out, &events(), &groups(), Utc::now()).unwrap();

        let mut names: Vec<_> = std::fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "all_events.ics",
                "hindu_festivals_diwali_events.ics",
                "hindu_festivals_events.ics",
                "index.html",
            ]
        );
        assert_eq!(artifacts.len(), 4);
        assert!(artifacts.last().unwrap().scope.is_none());
    }

    #[test]
    fn test_publish_only_page_for_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("docs");

        let artifacts = publish(&out, &EventSet::new(), &groups(), Utc::now()).unwrap();

        assert_eq!(artifacts.len(), 1);
        assert!(artifacts[0].scope.is_none());
        let names: Vec<_> = std::fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["index.html"]);
    }

    #[test]
    fn test_colliding_file_names_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("docs");
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let groups = vec![
            Group {
                group_name: "All".to_string(),
                ai_provider: "fixture".to_string(),
                calendar_items: vec![Subject::new("Everything")],
            },
            Group {
                group_name: "Other".to_string(),
                ai_provider: "fixture".to_string(),
                calendar_items: vec![Subject::new("Rest")],
            },
        ];
        let events = EventSet::from(vec![
            EventRecord::new("E1", date, date, "Everything").unwrap().with_group("All"),
            EventRecord::new("E2", date, date, "Rest").unwrap().with_group("Other"),
        ]);

        let err = publish(&out, &events, &groups, Utc::now()).unwrap_err();

        assert!(matches!(err, AlmanacError::FileNameCollision { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_unwritable_output_is_file_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("docs");
        std::fs::write(&blocker, "a file where the directory should be").unwrap();

        let err = publish(&blocker, &events(), &groups(), Utc::now()).unwrap_err();

        assert!(matches!(err, AlmanacError::FileWrite { .. }));
    }
}
