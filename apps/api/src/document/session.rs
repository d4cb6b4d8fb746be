//! The single in-memory editing session.
//!
//! Holds the current snapshot behind an `Arc` so readers (projector, exporter) clone a
//! pointer and work on an immutable value while the next edit builds a fresh snapshot.
//! `AppState` wraps the session in a `tokio::sync::RwLock`; every edit is one write-lock
//! critical section, so there is exactly one logical writer.

use std::sync::Arc;

use tracing::{debug, info};

use crate::document::mutators::{apply_edit, check_unique_ids, DocumentEdit, EditError};
use crate::models::resume::ResumeData;

#[derive(Debug)]
pub struct EditorSession {
    current: Arc<ResumeData>,
    revision: u64,
}

impl EditorSession {
    pub fn new(document: ResumeData) -> Self {
        Self {
            current: Arc::new(document),
            revision: 0,
        }
    }

    pub fn snapshot(&self) -> Arc<ResumeData> {
        Arc::clone(&self.current)
    }

    /// Incremented on every committed change; unchanged by no-op edits.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies one edit and returns the resulting snapshot.
    pub fn apply(&mut self, edit: DocumentEdit) -> Result<Arc<ResumeData>, EditError> {
        let op = edit.op_name();
        let next = apply_edit(&self.current, edit)?;

        if next == *self.current {
            debug!(op, revision = self.revision, "Edit left document unchanged");
            return Ok(self.snapshot());
        }

        self.commit(next);
        debug!(op, revision = self.revision, "Edit applied");
        Ok(self.snapshot())
    }

    /// Swaps in a whole document (import / reset). Entry ids must be unique per list.
    pub fn replace(&mut self, document: ResumeData) -> Result<Arc<ResumeData>, EditError> {
        check_unique_ids(&document)?;
        self.commit(document);
        info!(revision = self.revision, "Document replaced");
        Ok(self.snapshot())
    }

    fn commit(&mut self, next: ResumeData) {
        self.current = Arc::new(next);
        self.revision += 1;
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(ResumeData::default())
    }
}
