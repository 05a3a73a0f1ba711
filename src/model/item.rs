// File: ./src/model/item.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Task priority. `A` is the most urgent; sorting the enum ascending puts
/// the most urgent first. A task without a priority carries `None`, which
/// ranks after `C`.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Priority {
    A,
    B,
    C,
}

/// Closed recurrence set shared by both notations. Stored as a normalized
/// token, never as free text; anything outside the table parses to `None`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Line-notation code (`rec:<code>`).
    pub fn code(&self) -> &'static str {
        match self {
            Recurrence::Daily => "1d",
            Recurrence::Weekly => "1w",
            Recurrence::Monthly => "1m",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1d" => Some(Recurrence::Daily),
            "1w" => Some(Recurrence::Weekly),
            "1m" => Some(Recurrence::Monthly),
            _ => None,
        }
    }

    /// Checklist-notation phrase following the recurrence symbol.
    pub fn phrase(&self) -> &'static str {
        match self {
            Recurrence::Daily => "every day",
            Recurrence::Weekly => "every week",
            Recurrence::Monthly => "every month",
        }
    }

    /// Maps the unit word of an `every <unit>` phrase.
    pub fn from_unit(unit: &str) -> Option<Self> {
        match unit {
            "day" => Some(Recurrence::Daily),
            "week" => Some(Recurrence::Weekly),
            "month" => Some(Recurrence::Monthly),
            _ => None,
        }
    }
}

/// The canonical in-memory task, notation-agnostic.
///
/// Records are ephemeral: each sync cycle rebuilds them from a full parse
/// pass and discards them afterwards. Identity across cycles rests entirely
/// on [`TaskRecord::source_key`], which is why `description` must never
/// contain metadata tokens from either notation.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: String,
    pub done: bool,
    pub priority: Option<Priority>,
    pub due: Option<NaiveDate>,
    pub recurrence: Option<Recurrence>,
}

impl TaskRecord {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            priority: None,
            due: None,
            recurrence: None,
        }
    }

    /// Matching key across notations and sync cycles: the trimmed
    /// description. Derived on demand, never stored.
    pub fn source_key(&self) -> &str {
        self.description.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_source_key_is_trimmed_description() {
        let mut record = TaskRecord::new("  Buy milk ");
        assert_eq!(record.source_key(), "Buy milk");

        record.description = "Buy milk".to_string();
        assert_eq!(record.source_key(), "Buy milk");
    }

    #[test]
    fn test_priority_letter_roundtrip() {
        assert_eq!(Priority::from_str("A").unwrap(), Priority::A);
        assert_eq!(Priority::B.to_string(), "B");
        assert!(Priority::from_str("D").is_err());
    }

    #[test]
    fn test_recurrence_tables() {
        assert_eq!(Recurrence::from_code("1w"), Some(Recurrence::Weekly));
        assert_eq!(Recurrence::from_code("2w"), None);
        assert_eq!(Recurrence::from_unit("month"), Some(Recurrence::Monthly));
        assert_eq!(Recurrence::Daily.phrase(), "every day");
        assert_eq!(Recurrence::Monthly.code(), "1m");
    }
}
