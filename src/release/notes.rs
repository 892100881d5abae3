use crate::git::CommitInfo;
use chrono::{DateTime, Utc};

/// Build the generated release note for `version` from the commits since the
/// last tag.
///
/// Title line: `- <version> [ <earliest-date> – <latest-date> ]`, calendar
/// dates in UTC. Body: one `    -<message>` line per commit; the dash is
/// deliberately glued to the message, downstream tooling expects that exact
/// prefix. With no commits both dates fall back to today and the body is
/// empty.
pub fn build_release_note(version: &str, commits: &[CommitInfo]) -> String {
    let now = Utc::now().timestamp();
    let earliest = commits.iter().map(|c| c.seconds).min().unwrap_or(now);
    let latest = commits.iter().map(|c| c.seconds).max().unwrap_or(now);

    let mut lines = vec![format!(
        "- {} [ {} – {} ]",
        version,
        calendar_date(earliest),
        calendar_date(latest)
    )];
    for commit in commits {
        lines.push(format!("    -{}", commit.message));
    }

    lines.join("\n")
}

fn calendar_date(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
