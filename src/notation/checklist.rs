// File: ./src/notation/checklist.rs
//! Annotated-checklist notation embedded in Markdown documents.
//!
//! A candidate line carries a `- [ ]` / `- [x]` checkbox and the scope tag.
//! Metadata rides on configurable symbol markers: one due-date symbol
//! followed by a date, one recurrence symbol followed by a fixed
//! `every day|week|month` phrase, and three priority symbols for A/B/C.
//! Symbols may appear as standalone words or glued to the end of the
//! previous token, both of which occur in the wild.
use crate::config::SyncConfig;
use crate::model::{Priority, Recurrence, TaskRecord};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use strum::IntoEnumIterator;

const UNCHECKED: &str = "- [ ] ";
const CHECKED: &str = "- [x] ";

/// Parses every in-scope checklist line of a document, in line order.
pub fn parse(document: &str, config: &SyncConfig) -> Vec<TaskRecord> {
    document
        .lines()
        .filter_map(|line| parse_task_line(line, config))
        .collect()
}

fn checkbox_split(line: &str) -> Option<(bool, &str)> {
    if let Some(idx) = line.find(CHECKED) {
        return Some((true, &line[idx + CHECKED.len()..]));
    }
    if let Some(idx) = line.find(UNCHECKED) {
        return Some((false, &line[idx + UNCHECKED.len()..]));
    }
    None
}

/// Peels priority symbols glued to the end of a token
/// (e.g. `2024-01-10⏫`). The first symbol seen on the line wins.
fn peel_priority<'a>(
    mut word: &'a str,
    config: &SyncConfig,
    priority: &mut Option<Priority>,
) -> &'a str {
    loop {
        let mut stripped = false;
        for (p, symbol) in Priority::iter().zip(config.priority_symbols.iter()) {
            if let Some(rest) = word.strip_suffix(symbol.as_str()) {
                priority.get_or_insert(p);
                word = rest;
                stripped = true;
                break;
            }
        }
        if !stripped {
            return word;
        }
    }
}

/// Parses a single checklist line, or `None` when the line lacks a checkbox,
/// lacks the scope tag, or has no description left after stripping.
pub fn parse_task_line(line: &str, config: &SyncConfig) -> Option<TaskRecord> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if !line.contains(config.tag.as_str()) {
        return None;
    }
    let (done, body) = checkbox_split(line)?;

    let words: Vec<&str> = body.split_whitespace().collect();
    let mut priority = None;
    let mut due = None;
    let mut recurrence = None;
    let mut description_words: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < words.len() {
        let raw = words[i];
        i += 1;

        if raw == config.tag {
            continue;
        }

        let word = peel_priority(raw, config, &mut priority);
        if word.is_empty() {
            continue;
        }

        if let Some(rest) = word.strip_prefix(config.due_symbol.as_str()) {
            // Attached form "📅2024-01-10", or the date in the next word.
            let value = if rest.is_empty() && i < words.len() {
                let next = peel_priority(words[i], config, &mut priority);
                i += 1;
                next
            } else {
                rest
            };
            if due.is_none() {
                due = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok();
                if due.is_none() && !value.is_empty() {
                    log::debug!("Ignoring unparseable due date '{}'", value);
                }
            }
            continue;
        }

        if let Some(rest) = word.strip_prefix(config.recurrence_symbol.as_str()) {
            // The symbol itself is always stripped; only a recognized
            // two-word phrase is consumed with it.
            if rest.is_empty()
                && recurrence.is_none()
                && i + 1 < words.len()
                && words[i] == "every"
                && let Some(r) = Recurrence::from_unit(words[i + 1])
            {
                recurrence = Some(r);
                i += 2;
            } else if !rest.is_empty() {
                description_words.push(rest);
            }
            continue;
        }

        description_words.push(word);
    }

    let description = description_words.join(" ");
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

/// Renders one record as a checklist line. Token order is fixed for
/// round-trip stability: checkbox, description, due, recurrence, priority,
/// scope tag.
pub fn render_line(record: &TaskRecord, config: &SyncConfig) -> String {
    let mut parts: Vec<&str> = Vec::new();
    parts.push(if record.done { "- [x]" } else { "- [ ]" });
    parts.push(record.source_key());
    let due_text;
    if let Some(due) = record.due {
        due_text = due.format("%Y-%m-%d").to_string();
        parts.push(&config.due_symbol);
        parts.push(&due_text);
    }
    if let Some(rec) = record.recurrence {
        parts.push(&config.recurrence_symbol);
        parts.push(rec.phrase());
    }
    if let Some(p) = record.priority {
        parts.push(config.priority_symbol(p));
    }
    parts.push(&config.tag);
    parts.join(" ")
}

/// Replaces each task line whose recomputed source key matches an incoming
/// record, leaving every other line byte-for-byte unchanged. The prefix
/// before the checkbox (list indentation) and a trailing `\r` survive the
/// replacement. A record with no matching existing line is a hard error:
/// this codec patches documents, it never synthesizes them.
pub fn update_document(
    original: &str,
    records: &[TaskRecord],
    config: &SyncConfig,
) -> Result<String> {
    let mut by_key: HashMap<&str, &TaskRecord> = HashMap::new();
    for record in records {
        by_key.entry(record.source_key()).or_insert(record);
    }

    let mut applied: HashSet<&str> = HashSet::new();
    let mut lines: Vec<String> = Vec::new();

    for raw_line in original.split('\n') {
        let (content, line_ending) = match raw_line.strip_suffix('\r') {
            Some(content) => (content, "\r"),
            None => (raw_line, ""),
        };

        if let Some(existing) = parse_task_line(content, config)
            && let Some(record) = by_key.get(existing.source_key()).copied()
        {
            applied.insert(record.source_key());
            let indent_end = content.find("- [").unwrap_or(0);
            lines.push(format!(
                "{}{}{}",
                &content[..indent_end],
                render_line(record, config),
                line_ending
            ));
        } else {
            lines.push(raw_line.to_string());
        }
    }

    for record in records {
        if !applied.contains(record.source_key()) {
            bail!(
                "No existing checklist line matches task '{}'",
                record.source_key()
            );
        }
    }

    Ok(lines.join("\n"))
}
