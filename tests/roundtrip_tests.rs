use chrono::NaiveDate;
use todobridge::config::SyncConfig;
use todobridge::model::{Priority, Recurrence, TaskRecord};
use todobridge::notation::{checklist, line};

fn sample_records() -> Vec<TaskRecord> {
    let due = NaiveDate::parse_from_str("2024-01-10", "%Y-%m-%d").unwrap();
    vec![
        TaskRecord::new("Plain task"),
        TaskRecord {
            description: "Due only".to_string(),
            done: false,
            priority: None,
            due: Some(due),
            recurrence: None,
        },
        TaskRecord {
            description: "Recurring chore".to_string(),
            done: false,
            priority: None,
            due: None,
            recurrence: Some(Recurrence::Monthly),
        },
        TaskRecord {
            description: "Important call".to_string(),
            done: false,
            priority: Some(Priority::B),
            due: None,
            recurrence: None,
        },
        TaskRecord {
            description: "Everything at once".to_string(),
            done: true,
            priority: Some(Priority::C),
            due: Some(due),
            recurrence: Some(Recurrence::Daily),
        },
    ]
}

#[test]
fn test_line_notation_roundtrip_identity() {
    let config = SyncConfig::default();
    for record in sample_records() {
        let rendered = line::render_record(&record, &config);
        let parsed = line::parse_line(&rendered, &config)
            .unwrap_or_else(|| panic!("Rendered line failed to parse: {:?}", rendered));
        assert_eq!(parsed, record, "Line roundtrip changed the record");
    }
}

#[test]
fn test_checklist_notation_roundtrip_identity() {
    let config = SyncConfig::default();
    for record in sample_records() {
        let rendered = checklist::render_line(&record, &config);
        let parsed = checklist::parse_task_line(&rendered, &config)
            .unwrap_or_else(|| panic!("Rendered line failed to parse: {:?}", rendered));
        assert_eq!(parsed, record, "Checklist roundtrip changed the record");
    }
}

#[test]
fn test_cross_notation_roundtrip_preserves_identity() {
    let config = SyncConfig::default();
    for record in sample_records() {
        let as_checklist = checklist::render_line(&record, &config);
        let from_checklist = checklist::parse_task_line(&as_checklist, &config).unwrap();
        let as_line = line::render_record(&from_checklist, &config);
        let from_line = line::parse_line(&as_line, &config).unwrap();

        assert_eq!(from_line, record, "Crossing both notations changed the record");
        assert_eq!(
            from_line.source_key(),
            record.source_key(),
            "Source key must survive both notations or matching breaks"
        );
    }
}

#[test]
fn test_rendering_is_stable_under_reparse() {
    // parse(render(parse(x))) == parse(x): a second pass is byte-identical.
    let config = SyncConfig::default();
    let text = "(A) Buy milk due:2024-01-10 #todo\nx Water plants rec:1w #todo\n";

    let records = line::parse(text, &config);
    let rendered = line::render(&records, &config);
    assert_eq!(rendered, text);
    assert_eq!(line::parse(&rendered, &config), records);
}
