// File: ./src/store.rs
/*! File-store abstraction for the host vault.

The core never touches the filesystem directly: all IO flows through an
explicit `FileStore` passed in by the caller, so there are no hidden
globals and tests can run against an in-memory store. Two implementations
are provided:

- `DirStore`: a directory of Markdown files on disk (the production case).
- `MemoryStore`: a map-backed store for isolated tests.

Scope detection is deliberately crude, matching the source system: a
document is in scope iff its text contains the scope tag anywhere.
*/
use crate::config::SyncConfig;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Object-safe seam between the sync core and the host's file storage.
pub trait FileStore: Send + Sync {
    /// All in-scope documents as `(id, text)`, in a stable order. The line
    /// file itself is never listed, even when it carries the tag.
    fn list_scoped_documents(&self) -> Result<Vec<(String, String)>>;

    /// `None` when the file does not exist.
    fn read_text(&self, id: &str) -> Result<Option<String>>;

    fn write_text(&self, id: &str, text: &str) -> Result<()>;
}

// --- Production implementation ---

pub struct DirStore {
    root: PathBuf,
    tag: String,
    line_file: String,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>, config: &SyncConfig) -> Self {
        Self {
            root: root.into(),
            tag: config.tag.clone(),
            line_file: config.line_file.clone(),
        }
    }

    fn collect_markdown(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir)
            .with_context(|| format!("Failed to list directory {}", dir.display()))?
        {
            let path = entry?.path();
            let hidden = path
                .file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(false);
            if hidden {
                continue; // .obsidian and friends
            }
            if path.is_dir() {
                self.collect_markdown(&path, out)?;
            } else if path.extension().map(|e| e == "md").unwrap_or(false) {
                out.push(path);
            }
        }
        Ok(())
    }

    fn id_for(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

impl FileStore for DirStore {
    fn list_scoped_documents(&self) -> Result<Vec<(String, String)>> {
        let mut paths = Vec::new();
        self.collect_markdown(&self.root, &mut paths)?;
        paths.sort();

        let mut documents = Vec::new();
        for path in paths {
            let id = self.id_for(&path);
            if id == self.line_file {
                continue;
            }
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if text.contains(self.tag.as_str()) {
                documents.push((id, text));
            }
        }
        Ok(documents)
    }

    fn read_text(&self, id: &str) -> Result<Option<String>> {
        let path = self.root.join(id);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(text))
    }

    fn write_text(&self, id: &str, text: &str) -> Result<()> {
        let path = self.root.join(id);
        // Atomic write: write to .tmp file then rename
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, text)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

// --- Test implementation ---

/// Map-backed store mirroring `DirStore` behavior, for tests and embedding.
pub struct MemoryStore {
    files: Mutex<BTreeMap<String, String>>,
    tag: String,
    line_file: String,
}

impl MemoryStore {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
            tag: config.tag.clone(),
            line_file: config.line_file.clone(),
        }
    }

    pub fn insert(&self, id: &str, text: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(id.to_string(), text.to_string());
    }

    pub fn get(&self, id: &str) -> Option<String> {
        self.files.lock().unwrap().get(id).cloned()
    }
}

impl FileStore for MemoryStore {
    fn list_scoped_documents(&self) -> Result<Vec<(String, String)>> {
        let files = self.files.lock().unwrap();
        Ok(files
            .iter()
            .filter(|(id, text)| id.as_str() != self.line_file && text.contains(self.tag.as_str()))
            .map(|(id, text)| (id.clone(), text.clone()))
            .collect())
    }

    fn read_text(&self, id: &str) -> Result<Option<String>> {
        Ok(self.files.lock().unwrap().get(id).cloned())
    }

    fn write_text(&self, id: &str, text: &str) -> Result<()> {
        self.insert(id, text);
        Ok(())
    }
}
