use chrono::NaiveDate;
use todobridge::config::SyncConfig;
use todobridge::model::{Priority, TaskRecord};
use todobridge::reconcile::{self, SyncWarning};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn docs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(id, text)| (id.to_string(), text.to_string()))
        .collect()
}

#[test]
fn test_collect_records_preserves_listing_then_line_order() {
    let config = SyncConfig::default();
    let documents = docs(&[
        ("a.md", "- [ ] First #todo\n- [ ] Second #todo\n"),
        ("b.md", "Prose here.\n- [x] Third #todo\n"),
    ]);

    let records = reconcile::collect_records(&documents, &config);
    let keys: Vec<&str> = records.iter().map(|r| r.source_key()).collect();
    assert_eq!(keys, vec!["First", "Second", "Third"]);
    assert!(records[2].done);
}

#[test]
fn test_metadata_change_updates_owning_line_in_place() {
    let config = SyncConfig::default();
    let documents = docs(&[("a.md", "- [ ] Buy milk #todo\n- [ ] Other #todo\n")]);

    let record = TaskRecord {
        description: "Buy milk".to_string(),
        done: false,
        priority: Some(Priority::A),
        due: Some(date("2024-01-10")),
        recurrence: None,
    };

    let (patches, warnings) =
        reconcile::plan_document_updates(&[record], &documents, &config).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].id, "a.md");
    assert_eq!(
        patches[0].new_text,
        "- [ ] Buy milk 📅 2024-01-10 ⏫ #todo\n- [ ] Other #todo\n",
        "Same key must update the same line, never add one"
    );
}

#[test]
fn test_unmatched_task_is_reported_not_guessed() {
    let config = SyncConfig::default();
    let documents = docs(&[("a.md", "- [ ] Buy milk #todo\n")]);

    let (patches, warnings) =
        reconcile::plan_document_updates(&[TaskRecord::new("Ghost task")], &documents, &config)
            .unwrap();

    assert!(patches.is_empty(), "Nothing to write for an unplaceable task");
    assert_eq!(
        warnings,
        vec![SyncWarning::UnmatchedTask {
            key: "Ghost task".to_string()
        }]
    );
}

#[test]
fn test_duplicate_key_across_documents_first_match_wins() {
    let config = SyncConfig::default();
    let documents = docs(&[
        ("a.md", "- [ ] Buy milk #todo\n"),
        ("b.md", "- [ ] Buy milk #todo\n"),
    ]);

    let mut record = TaskRecord::new("Buy milk");
    record.done = true;

    let (patches, warnings) =
        reconcile::plan_document_updates(&[record], &documents, &config).unwrap();

    assert_eq!(patches.len(), 1, "Only the first document in scan order is patched");
    assert_eq!(patches[0].id, "a.md");
    assert_eq!(
        warnings,
        vec![SyncWarning::DuplicateKey {
            key: "Buy milk".to_string(),
            location: "b.md".to_string()
        }]
    );
}

#[test]
fn test_duplicate_key_within_record_set_first_wins() {
    let config = SyncConfig::default();
    let documents = docs(&[("a.md", "- [ ] Buy milk #todo\n")]);

    let first = TaskRecord {
        description: "Buy milk".to_string(),
        done: true,
        priority: None,
        due: None,
        recurrence: None,
    };
    let second = TaskRecord {
        description: "Buy milk".to_string(),
        done: false,
        priority: Some(Priority::C),
        due: None,
        recurrence: None,
    };

    let (patches, warnings) =
        reconcile::plan_document_updates(&[first, second], &documents, &config).unwrap();

    assert_eq!(patches.len(), 1);
    assert_eq!(
        patches[0].new_text, "- [x] Buy milk #todo\n",
        "Only the first record is applied"
    );
    assert_eq!(
        warnings,
        vec![SyncWarning::DuplicateKey {
            key: "Buy milk".to_string(),
            location: "todo.txt".to_string()
        }]
    );
}

#[test]
fn test_unchanged_record_yields_no_patch() {
    let config = SyncConfig::default();
    let documents = docs(&[("a.md", "- [ ] Buy milk #todo\n")]);

    let (patches, warnings) =
        reconcile::plan_document_updates(&[TaskRecord::new("Buy milk")], &documents, &config)
            .unwrap();

    assert!(patches.is_empty(), "A no-op rewrite must be skipped");
    assert!(warnings.is_empty());
}
