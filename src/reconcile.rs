// File: ./src/reconcile.rs
//! Matches records between the two notations without duplicating or losing
//! tasks. Pure planning logic; all IO stays in the coordinator.
//!
//! The two directions are asymmetric by design. Documents → line file is
//! fully derivational (the line file is regenerated wholesale, so there is
//! no matching problem). Line file → documents is patch-style: each record
//! must be placed into the single document that already owns its key.
use crate::config::SyncConfig;
use crate::model::TaskRecord;
use crate::notation::checklist;
use anyhow::Result;
use std::collections::HashSet;
use std::fmt;

/// Non-fatal conditions surfaced to the operator. Neither aborts a run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SyncWarning {
    /// A line-file task has no originating checklist line anywhere in
    /// scope, so it cannot be placed and is left out of the write.
    UnmatchedTask { key: String },
    /// The same source key appears more than once; the first occurrence in
    /// scan order wins. Unique descriptions scope-wide are a documented
    /// precondition, not something this module can enforce.
    DuplicateKey { key: String, location: String },
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::UnmatchedTask { key } => {
                write!(f, "Task '{}' has no originating document line", key)
            }
            SyncWarning::DuplicateKey { key, location } => {
                write!(f, "Duplicate task '{}' in {} (first match wins)", key, location)
            }
        }
    }
}

/// Outcome of one sync direction.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Ids of files actually written (no-op writes are skipped).
    pub written: Vec<String>,
    pub warnings: Vec<SyncWarning>,
}

/// A planned in-place document rewrite.
#[derive(Debug)]
pub struct DocumentPatch {
    pub id: String,
    pub new_text: String,
}

/// Documents → line file: every record from every scoped document, in
/// (document listing order, line order within document).
pub fn collect_records(documents: &[(String, String)], config: &SyncConfig) -> Vec<TaskRecord> {
    documents
        .iter()
        .flat_map(|(_, text)| checklist::parse(text, config))
        .collect()
}

/// Line file → documents: map each record onto the document owning its key
/// and plan the rewrites. Patches whose text equals the current document
/// text are dropped so a second pass writes nothing.
pub fn plan_document_updates(
    records: &[TaskRecord],
    documents: &[(String, String)],
    config: &SyncConfig,
) -> Result<(Vec<DocumentPatch>, Vec<SyncWarning>)> {
    let mut warnings = Vec::new();

    // Dedupe the incoming set itself; first record wins.
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique: Vec<&TaskRecord> = Vec::new();
    for record in records {
        if seen.insert(record.source_key()) {
            unique.push(record);
        } else {
            warnings.push(SyncWarning::DuplicateKey {
                key: record.source_key().to_string(),
                location: config.line_file.clone(),
            });
        }
    }

    // Recompute each document's key set once.
    let document_keys: Vec<HashSet<String>> = documents
        .iter()
        .map(|(_, text)| {
            checklist::parse(text, config)
                .iter()
                .map(|r| r.source_key().to_string())
                .collect()
        })
        .collect();

    let mut assignments: Vec<Vec<&TaskRecord>> = vec![Vec::new(); documents.len()];
    for record in unique {
        let mut owner = None;
        for (idx, keys) in document_keys.iter().enumerate() {
            if !keys.contains(record.source_key()) {
                continue;
            }
            if owner.is_none() {
                owner = Some(idx);
            } else {
                warnings.push(SyncWarning::DuplicateKey {
                    key: record.source_key().to_string(),
                    location: documents[idx].0.clone(),
                });
            }
        }
        match owner {
            Some(idx) => assignments[idx].push(record),
            None => warnings.push(SyncWarning::UnmatchedTask {
                key: record.source_key().to_string(),
            }),
        }
    }

    let mut patches = Vec::new();
    for (idx, assigned) in assignments.into_iter().enumerate() {
        if assigned.is_empty() {
            continue;
        }
        let (id, text) = &documents[idx];
        let owned: Vec<TaskRecord> = assigned.into_iter().cloned().collect();
        let new_text = checklist::update_document(text, &owned, config)?;
        if new_text != *text {
            patches.push(DocumentPatch {
                id: id.clone(),
                new_text,
            });
        }
    }

    for warning in &warnings {
        log::warn!("{}", warning);
    }

    Ok((patches, warnings))
}
