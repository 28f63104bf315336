//! Collapsing repeated events across subjects and groups.

use std::collections::HashSet;

use crate::event::EventSet;

/// Keep the first occurrence of every (name, start, end) triple.
///
/// Subject and group are not part of the key: the same named event reported
/// under two subjects is one real-world event. Order is preserved.
pub fn dedupe(events: EventSet) -> EventSet {
    let mut seen = HashSet::new();

    events
        .into_iter()
        .filter(|event| {
            let (name, start, end) = event.key();
            seen.insert((name.to_string(), start, end))
        })
        .collect()
}
