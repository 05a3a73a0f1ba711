// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_tag() -> String {
    "#todo".to_string()
}

fn default_line_file() -> String {
    "todo.txt".to_string()
}

fn default_due_symbol() -> String {
    "\u{1F4C5}".to_string() // 📅
}

fn default_recurrence_symbol() -> String {
    "\u{1F501}".to_string() // 🔁
}

fn default_priority_symbols() -> [String; 3] {
    // A, B, C — ⏫ / 🔺 / 🔻
    [
        "\u{23EB}".to_string(),
        "\u{1F53A}".to_string(),
        "\u{1F53B}".to_string(),
    ]
}

/// Notation configuration shared by both codecs and the coordinator.
///
/// The symbols are a mapping table, not semantics: any three distinct
/// priority symbols plus one due-date and one recurrence symbol work, as
/// long as both sides of a vault agree on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Scope marker; only lines carrying it participate in sync.
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Name of the derived line-notation file inside the vault root.
    #[serde(default = "default_line_file")]
    pub line_file: String,

    #[serde(default = "default_due_symbol")]
    pub due_symbol: String,

    #[serde(default = "default_recurrence_symbol")]
    pub recurrence_symbol: String,

    /// Priority symbols for A, B and C, in that order.
    #[serde(default = "default_priority_symbols")]
    pub priority_symbols: [String; 3],
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            line_file: default_line_file(),
            due_symbol: default_due_symbol(),
            recurrence_symbol: default_recurrence_symbol(),
            priority_symbols: default_priority_symbols(),
        }
    }
}

impl SyncConfig {
    /// Symbol for a given priority (A/B/C in table order).
    pub fn priority_symbol(&self, priority: crate::model::Priority) -> &str {
        &self.priority_symbols[priority as usize]
    }

    /// Load the config from a TOML file, falling back to defaults when the
    /// file does not exist. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_plugin_symbols() {
        let config = SyncConfig::default();
        assert_eq!(config.tag, "#todo");
        assert_eq!(config.line_file, "todo.txt");
        assert_eq!(config.due_symbol, "📅");
        assert_eq!(config.recurrence_symbol, "🔁");
        assert_eq!(config.priority_symbols[0], "⏫");
        assert_eq!(config.priority_symbols[1], "🔺");
        assert_eq!(config.priority_symbols[2], "🔻");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SyncConfig = toml::from_str("tag = \"#tasks\"").unwrap();
        assert_eq!(config.tag, "#tasks");
        assert_eq!(config.line_file, "todo.txt");
    }
}
