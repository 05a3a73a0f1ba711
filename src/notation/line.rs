// File: ./src/notation/line.rs
//! Line-oriented (todo.txt style) notation.
//!
//! One task per line: optional `x ` completion prefix, `(A)`..`(C)` priority
//! token, free-text description with inline `due:YYYY-MM-DD` and
//! `rec:1d|1w|1m` keys, plus the scope tag. The whole file is derived state:
//! parse ignores out-of-scope lines instead of preserving them, and render
//! never consults prior file content.
use crate::config::SyncConfig;
use crate::model::{Priority, Recurrence, TaskRecord};
use chrono::NaiveDate;
use std::str::FromStr;

/// Parses a whole line file. Lines without the scope tag are skipped.
pub fn parse(text: &str, config: &SyncConfig) -> Vec<TaskRecord> {
    text.lines()
        .filter_map(|line| parse_line(line, config))
        .collect()
}

/// Parses a single candidate line, or `None` when the line is out of scope
/// or carries no description once metadata is stripped.
pub fn parse_line(line: &str, config: &SyncConfig) -> Option<TaskRecord> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if !line.contains(config.tag.as_str()) {
        return None;
    }

    // Completion marker: exact, case-sensitive, line start only.
    let (done, rest) = match line.strip_prefix("x ") {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    let mut priority = None;
    let mut due = None;
    let mut recurrence = None;
    let mut words: Vec<&str> = Vec::new();

    for word in rest.split_whitespace() {
        if word == config.tag {
            continue;
        }

        // Priority token: whole word "(A)".."(C)". First match wins; later
        // ones stay in the description, as the source notation does.
        if priority.is_none()
            && let Some(inner) = word.strip_prefix('(').and_then(|w| w.strip_suffix(')'))
            && let Ok(p) = Priority::from_str(inner)
        {
            priority = Some(p);
            continue;
        }

        // Key+value is stripped even when the value does not parse, so a
        // malformed token can never leak into the source key.
        if let Some(value) = word.strip_prefix("due:") {
            if due.is_none() {
                due = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok();
                if due.is_none() {
                    log::debug!("Ignoring unparseable due date '{}'", value);
                }
            }
            continue;
        }

        if let Some(value) = word.strip_prefix("rec:") {
            if recurrence.is_none() {
                recurrence = Recurrence::from_code(value);
                if recurrence.is_none() {
                    log::debug!("Ignoring unknown recurrence code '{}'", value);
                }
            }
            continue;
        }

        words.push(word);
    }

    let description = words.join(" ");
    if description.is_empty() {
        return None;
    }

    Some(TaskRecord {
        description,
        done,
        priority,
        due,
        recurrence,
    })
}

/// Renders the full line file: one line per record in input order, newline
/// terminated. A pure function of the record set.
pub fn render(records: &[TaskRecord], config: &SyncConfig) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&render_record(record, config));
        out.push('\n');
    }
    out
}

/// Renders one record. Token order is fixed: completion prefix, priority,
/// description, due, recurrence, scope tag.
pub fn render_record(record: &TaskRecord, config: &SyncConfig) -> String {
    let mut line = String::new();
    if record.done {
        line.push_str("x ");
    }
    if let Some(p) = record.priority {
        line.push_str(&format!("({}) ", p));
    }
    line.push_str(record.source_key());
    if let Some(due) = record.due {
        line.push_str(&format!(" due:{}", due.format("%Y-%m-%d")));
    }
    if let Some(rec) = record.recurrence {
        line.push_str(&format!(" rec:{}", rec.code()));
    }
    line.push(' ');
    line.push_str(&config.tag);
    line
}
