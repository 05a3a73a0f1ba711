// File: ./src/coordinator.rs
/*! Composition root for the two sync directions.

The coordinator is constructed with an injected store and config; it owns
no ambient state and exposes plain methods for an external dispatcher to
call when it decides a sync is due. Both directions diff before writing:
the host event model cannot distinguish self-originated writes, so a no-op
write is the only way to break the document ↔ line-file ping-pong.

Overlapping invocations serialize on an internal run lock; a trigger that
arrives mid-run waits and then re-runs against the fresh state, which is
exactly the queue-once-more behavior the source system needs.
*/
use crate::config::SyncConfig;
use crate::notation::line;
use crate::reconcile::{self, SyncReport};
use crate::store::FileStore;
use anyhow::Result;
use std::sync::{Arc, Mutex};

pub struct SyncCoordinator {
    store: Arc<dyn FileStore>,
    config: SyncConfig,
    run_lock: Mutex<()>,
}

impl SyncCoordinator {
    pub fn new(store: Arc<dyn FileStore>, config: SyncConfig) -> Self {
        Self {
            store,
            config,
            run_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Documents → line file. Fully derivational: the previous line-file
    /// content is discarded and only consulted for the no-op write check.
    pub fn sync_from_documents(&self) -> Result<SyncReport> {
        let _guard = self.run_lock.lock().unwrap();

        let documents = self.store.list_scoped_documents()?;
        let records = reconcile::collect_records(&documents, &self.config);
        let content = line::render(&records, &self.config);

        let mut report = SyncReport::default();
        let current = self.store.read_text(&self.config.line_file)?;
        if current.as_deref() != Some(content.as_str()) {
            self.store.write_text(&self.config.line_file, &content)?;
            log::info!(
                "Updated {} with {} tasks from {} documents",
                self.config.line_file,
                records.len(),
                documents.len()
            );
            report.written.push(self.config.line_file.clone());
        }
        Ok(report)
    }

    /// Line file → documents. Patch-style: each task is placed into the one
    /// document already owning its key; tasks with no owning document are
    /// reported, never guessed at. All patches are planned before the first
    /// write so a planning failure leaves every document untouched.
    pub fn sync_from_line_file(&self) -> Result<SyncReport> {
        let _guard = self.run_lock.lock().unwrap();

        let Some(content) = self.store.read_text(&self.config.line_file)? else {
            log::info!("{} does not exist yet; nothing to push", self.config.line_file);
            return Ok(SyncReport::default());
        };

        let records = line::parse(&content, &self.config);
        let documents = self.store.list_scoped_documents()?;
        let (patches, warnings) =
            reconcile::plan_document_updates(&records, &documents, &self.config)?;

        let mut report = SyncReport {
            warnings,
            ..Default::default()
        };
        for patch in patches {
            self.store.write_text(&patch.id, &patch.new_text)?;
            log::info!("Updated document {}", patch.id);
            report.written.push(patch.id);
        }
        Ok(report)
    }
}
