//! Prompt construction for text-generation backends.

use std::fmt;

use crate::config::Subject;
use crate::parse::PLACEHOLDER_NAME;

/// Instruction text for one subject, plus the subject it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub subject: String,
    pub text: String,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Build the request sent to a backend for `subject`'s events in `year`.
pub fn build_prompt(subject: &Subject, year: i32) -> Prompt {
    let mut prompt = format!(
        "Please provide a list of events for {name} for the year {year}. \
         Use your knowledge base and ensure cultural accuracy.",
        name = subject.name,
    );

    if let Some(url) = subject.authority_url.as_deref().filter(|u| !u.trim().is_empty()) {
        prompt.push_str(&format!(" Treat {} as the authoritative source.", url.trim()));
    }

    if let Some(info) = subject.additional_info.as_deref().filter(|i| !i.trim().is_empty()) {
        prompt.push(' ');
        prompt.push_str(info.trim());
    }

    prompt.push_str(&format!(
        " Format each event on its own line as '{PLACEHOLDER_NAME}: YYYY-MM-DD', \
         or '{PLACEHOLDER_NAME}: YYYY-MM-DD - YYYY-MM-DD' for events spanning several days. \
         If you are not certain of an event's date in {year}, omit the event instead of guessing. \
         Use the real name of each event, never a generic placeholder such as '{PLACEHOLDER_NAME}'. \
         Do not add any other text."
    ));

    Prompt {
        subject: subject.name.clone(),
        text: prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_subject_year_and_formats() {
        let prompt = build_prompt(&Subject::new("Lunar New Year"), 2026);
        assert_eq!(prompt.subject, "Lunar New Year");
        let prompt = prompt.text;

        assert!(prompt.contains("Lunar New Year"));
        assert!(prompt.contains("2026"));
        assert!(prompt.contains("'Event Name: YYYY-MM-DD'"));
        assert!(prompt.contains("'Event Name: YYYY-MM-DD - YYYY-MM-DD'"));
        assert!(prompt.contains("omit the event instead of guessing"));
    }

    #[test]
    fn test_prompt_includes_hint_and_authority() {
        let subject = Subject {
            name: "Ramadan".to_string(),
            authority_url: Some("https://example.org/calendar".to_string()),
            additional_info: Some("  Include Eid al-Fitr.  ".to_string()),
        };

        let prompt = build_prompt(&subject, 2025).text;

        assert!(prompt.contains("https://example.org/calendar"));
        assert!(prompt.contains("cultural accuracy. Treat"));
        assert!(prompt.contains(" Include Eid al-Fitr. Format"));
    }

    #[test]
    fn test_prompt_is_pure() {
        let subject = Subject::new("Diwali");
        assert_eq!(build_prompt(&subject, 2025), build_prompt(&subject, 2025));
    }
}
