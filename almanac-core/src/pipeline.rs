//! One full collection pass: every (group, subject) pair is prompted, queried
//! and parsed, then the results are merged into one deduplicated event set.
//!
//! Subjects may be queried concurrently, but contributions are accumulated in
//! generation order (config order), so "first occurrence wins" during
//! deduplication is reproducible.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::{Group, Subject};
use crate::dedupe::dedupe;
use crate::error::AlmanacError;
use crate::event::EventSet;
use crate::generator::{GeneratorResolver, TextGenerator};
use crate::parse::parse_response;
use crate::prompt::build_prompt;

/// A recoverable failure attributed to a group, and to a subject when known.
#[derive(Debug)]
pub struct SubjectWarning {
    pub group: String,
    pub subject: Option<String>,
    pub error: AlmanacError,
}

/// Outcome of a collection pass.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Deduplicated events in generation order
    pub events: EventSet,
    /// Warnings in generation order
    pub warnings: Vec<SubjectWarning>,
    pub subjects_queried: usize,
    /// Events parsed before deduplication
    pub events_parsed: usize,
}

struct Job {
    group: String,
    subject: Subject,
    generator: Arc<dyn TextGenerator>,
}

enum Step {
    Query(Job),
    Skip(SubjectWarning),
}

/// Query every subject of every group and merge the results.
///
/// At most `max_concurrency` queries are in flight at once (minimum 1).
pub async fn collect<R>(groups: &[Group], resolver: &R, year: i32, max_concurrency: usize) -> RunReport
where
    R: GeneratorResolver + ?Sized,
{
    let steps = plan(groups, resolver);
    let subjects_queried = steps.iter().filter(|s| matches!(s, Step::Query(_))).count();

    info!(
        groups = groups.len(),
        subjects = subjects_queried,
        year,
        max_concurrency,
        "collecting events"
    );

    let mut report = stream::iter(steps)
        .map(|step| async move {
            match step {
                Step::Query(job) => run_job(job, year).await,
                Step::Skip(warning) => Err(warning),
            }
        })
        .buffered(max_concurrency.max(1))
        .fold(RunReport::default(), |mut report, outcome| async move {
            match outcome {
                Ok(events) => report.events.extend(events),
                Err(warning) => report.warnings.push(warning),
            }
            report
        })
        .await;

    report.subjects_queried = subjects_queried;
    report.events_parsed = report.events.len();
    report.events = dedupe(report.events);

    info!(
        parsed = report.events_parsed,
        unique = report.events.len(),
        warnings = report.warnings.len(),
        "collection finished"
    );

    report
}

/// Resolve each group's backend once and lay out the jobs in config order.
fn plan<R>(groups: &[Group], resolver: &R) -> Vec<Step>
where
    R: GeneratorResolver + ?Sized,
{
    let mut steps = Vec::new();

    for group in groups {
        match resolver.resolve(&group.ai_provider) {
            Ok(generator) => {
                for subject in &group.calendar_items {
                    steps.push(Step::Query(Job {
                        group: group.group_name.clone(),
                        subject: subject.clone(),
                        generator: Arc::clone(&generator),
                    }));
                }
            }
            Err(error) => {
                warn!(group = %group.group_name, %error, "skipping group");
                steps.push(Step::Skip(SubjectWarning {
                    group: group.group_name.clone(),
                    subject: None,
                    error,
                }));
            }
        }
    }

    steps
}

async fn run_job(job: Job, year: i32) -> Result<EventSet, SubjectWarning> {
    let subject = job.subject.name.as_str();
    let fail = |error: AlmanacError| {
        warn!(group = %job.group, subject, %error, "skipping subject");
        SubjectWarning {
            group: job.group.clone(),
            subject: Some(subject.to_string()),
            error,
        }
    };

    let prompt = build_prompt(&job.subject, year);
    debug!(subject, backend = job.generator.name(), %prompt, "querying");

    let raw = job.generator.query(&prompt).await.map_err(fail)?;
    debug!(subject, response = %raw, "raw response");

    let parsed = parse_response(&raw, subject).map_err(fail)?;
    if !parsed.discarded.is_empty() {
        warn!(
            group = %job.group,
            subject,
            discarded = parsed.discarded.len(),
            "discarded unparseable lines"
        );
    }

    Ok(parsed.events.tagged(&job.group))
}
