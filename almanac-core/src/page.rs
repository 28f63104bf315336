//! The browsable index page.
//!
//! The page lists subjects by group, shows every event in one table and links
//! every calendar file that gets emitted. Filtering happens in the browser:
//! a row is shown when no subject is selected or its (group, subject) pair is
//! selected.

use indoc::formatdoc;

use crate::config::Group;
use crate::event::EventSet;
use crate::index::EventIndex;

const FILTER_SCRIPT: &str = r##"
const filters = Array.from(document.querySelectorAll("input.subject-filter"));
const key = (el, subject) => JSON.stringify([el.dataset.group, subject]);
function applyFilter() {
  const selected = new Set(filters.filter((f) => f.checked).map((f) => key(f, f.value)));
  document.querySelectorAll("#events tbody tr").forEach((row) => {
    row.hidden = selected.size > 0 && !selected.has(key(row, row.dataset.subject));
  });
}
filters.forEach((f) => f.addEventListener("change", applyFilter));
applyFilter();
"##;

/// Render the page for the global event set. Rows keep the set's order.
pub fn compose(events: &EventSet, groups: &[Group]) -> String {
    let subjects = render_subject_list(groups);
    let rows = render_rows(events);
    let links = render_links(events, groups);

    formatdoc! {r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <title>Event Calendars</title>
        </head>
        <body>
        <h1>Event Calendars</h1>
        <section id="subjects">
        <h2>Subjects</h2>
        {subjects}</section>
        <section id="calendars">
        <h2>Subscribe</h2>
        <ul>
        {links}</ul>
        </section>
        <section>
        <h2>Events</h2>
        <table id="events">
        <thead><tr><th>Event</th><th>Start</th><th>End</th><th>Group</th><th>Subject</th></tr></thead>
        <tbody>
        {rows}</tbody>
        </table>
        </section>
        <script>{script}</script>
        </body>
        </html>
    "#,
        subjects = subjects,
        links = links,
        rows = rows,
        script = FILTER_SCRIPT,
    }
}

fn render_subject_list(groups: &[Group]) -> String {
    let mut out = String::new();

    for group in groups {
        out.push_str(&format!(
            "<fieldset data-group=\"{}\">\n<legend>{}</legend>\n",
            escape(&group.group_name),
            escape(&group.group_name)
        ));
        for subject in &group.calendar_items {
            let label = match subject.authority_url.as_deref() {
                Some(url) => format!(
                    "{} (<a href=\"{}\">source</a>)",
                    escape(&subject.name),
                    escape(url)
                ),
                None => escape(&subject.name),
            };
            out.push_str(&format!(
                "<label><input type=\"checkbox\" class=\"subject-filter\" data-group=\"{}\" value=\"{}\"> {}</label>\n",
                escape(&group.group_name),
                escape(&subject.name),
                label
            ));
        }
        out.push_str("</fieldset>\n");
    }

    out
}

fn render_rows(events: &EventSet) -> String {
    events
        .iter()
        .map(|event| {
            format!(
                "<tr data-group=\"{group}\" data-subject=\"{subject}\"><td>{name}</td><td>{start}</td><td>{end}</td><td>{group}</td><td>{subject}</td></tr>\n",
                group = escape(event.group()),
                subject = escape(event.subject()),
                name = escape(event.name()),
                start = event.start_date(),
                end = event.end_date(),
            )
        })
        .collect()
}

/// Links to exactly the calendars that get emitted for this event set.
fn render_links(events: &EventSet, groups: &[Group]) -> String {
    let index = EventIndex::new(events, groups);

    index
        .scopes()
        .into_iter()
        .filter(|scope| index.by_scope(scope).is_some())
        .map(|scope| {
            format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                escape(&urlencoding::encode(&scope.file_name())),
                escape(scope.display_name())
            )
        })
        .collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Subject;
    use crate::event::EventRecord;
    use chrono::NaiveDate;

    fn event(name: &str, day: u32, subject: &str, group: &str) -> EventRecord {
        let date = NaiveDate::from_ymd_opt(2025, 5, day).unwrap();
        EventRecord::new(name, date, date, subject).unwrap().with_group(group)
    }

    fn groups() -> Vec<Group> {
        vec![Group {
            group_name: "World Religions".to_string(),
            ai_provider: "fixture".to_string(),
            calendar_items: vec![Subject::new("Buddhism"), Subject::new("Jainism")],
        }]
    }

    #[test]
    fn test_rows_keep_event_order() {
        let events = EventSet::from(vec![
            event("Zeta", 20, "Buddhism", "World Religions"),
            event("Alpha", 1, "Buddhism", "World Religions"),
        ]);

        let html = compose(&events, &groups());

        let zeta = html.find("<td>Zeta</td>").unwrap();
        let alpha = html.find("<td>Alpha</td>").unwrap();
        assert!(zeta < alpha);
        assert!(html.contains(
            "<tr data-group=\"World Religions\" data-subject=\"Buddhism\"><td>Zeta</td><td>2025-05-20</td>"
        ));
    }

    #[test]
    fn test_links_only_emitted_calendars() {
        let events = EventSet::from(vec![event("Vesak", 12, "Buddhism", "World Religions")]);

        let html = compose(&events, &groups());

        assert!(html.contains("href=\"all_events.ics\""));
        assert!(html.contains("href=\"world_religions_events.ics\""));
        assert!(html.contains("href=\"world_religions_buddhism_events.ics\""));
        assert!(!html.contains("world_religions_jainism_events.ics"));
    }

    #[test]
    fn test_every_subject_is_selectable() {
        let html = compose(&EventSet::new(), &groups());

        assert!(html.contains("<legend>World Religions</legend>"));
        assert!(html.contains("data-group=\"World Religions\" value=\"Buddhism\""));
        assert!(html.contains("data-group=\"World Religions\" value=\"Jainism\""));
    }

    #[test]
    fn test_same_subject_in_two_groups_filters_separately() {
        let groups = vec![
            Group {
                group_name: "Lunar".to_string(),
                ai_provider: "fixture".to_string(),
                calendar_items: vec![Subject::new("New Year")],
            },
            Group {
                group_name: "Civil".to_string(),
                ai_provider: "fixture".to_string(),
                calendar_items: vec![Subject::new("New Year")],
            },
        ];

        let html = compose(&EventSet::new(), &groups);

        assert!(html.contains("data-group=\"Lunar\" value=\"New Year\""));
        assert!(html.contains("data-group=\"Civil\" value=\"New Year\""));
        assert!(html.contains("key(row, row.dataset.subject)"));
        assert!(html.contains("querySelectorAll(\"#events tbody tr\")"));
    }

    #[test]
    fn test_link_file_names_are_percent_encoded() {
        let groups = vec![Group {
            group_name: "Music".to_string(),
            ai_provider: "fixture".to_string(),
            calendar_items: vec![Subject::new("C# Day?")],
        }];
        let events = EventSet::from(vec![event("Jam", 4, "C# Day?", "Music")]);

        let html = compose(&events, &groups);

        assert!(html.contains("<li><a href=\"music_c%23_day%3F_events.ics\">C# Day?</a></li>"));
        assert!(!html.contains("href=\"music_c#"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let events = EventSet::from(vec![event("<b>Loud</b> & \"Proud\"", 3, "Buddhism", "World Religions")]);

        let html = compose(&events, &groups());

        assert!(html.contains("&lt;b&gt;Loud&lt;/b&gt; &amp; &quot;Proud&quot;"));
        assert!(!html.contains("<b>Loud</b>"));
    }
}
