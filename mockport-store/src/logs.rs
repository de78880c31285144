use crate::journal::LogJournal;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockport_core::error::PortalError;
use mockport_core::id::ValidId;
use mockport_core::log::{LogRecord, LogRecordInput};
use mockport_core::repository::{LogReader, LogWriter};
use std::cmp::Reverse;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

/// Append-only call log held in memory, optionally backed by a journal.
///
/// Records are never mutated or removed once appended. `created_at` is
/// assigned here and never goes backwards, even if the wall clock does.
pub struct MemoryLogStore {
    state: Mutex<LogState>,
    journal: Option<LogJournal>,
}

#[derive(Default)]
struct LogState {
    /// Insertion order; the index breaks `created_at` ties.
    records: Vec<LogRecord>,
    last_created_at: Option<DateTime<Utc>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LogState::default()),
            journal: None,
        }
    }

    /// Store whose appends are written to `journal` before becoming visible.
    pub fn with_journal(journal: LogJournal) -> Self {
        Self {
            state: Mutex::new(LogState::default()),
            journal: Some(journal),
        }
    }

    /// Load previously persisted records (journal replay). Not journaled again.
    pub fn restore(&self, records: Vec<LogRecord>) -> Result<usize, PortalError> {
        let mut state = self.lock(PortalError::Write)?;
        let count = records.len();
        for record in records {
            state.last_created_at = state.last_created_at.max(Some(record.created_at));
            state.records.push(record);
        }
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
        kind: fn(String) -> PortalError,
    ) -> Result<MutexGuard<'_, LogState>, PortalError> {
        self.state
            .lock()
            .map_err(|_| kind("log store lock poisoned".into()))
    }
}

impl Default for MemoryLogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogWriter for MemoryLogStore {
    async fn append(&self, input: LogRecordInput) -> Result<LogRecord, PortalError> {
        let mut state = self.lock(PortalError::Write)?;

        let now = Utc::now();
        let created_at = match state.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        let record = input.into_record(Uuid::new_v4(), created_at);

        // The journal line goes first so memory never shows an unpersisted record.
        // It is written under the log lock, which keeps file order equal to
        // memory order; the write is a single short line of blocking I/O.
        if let Some(journal) = &self.journal {
            journal
                .append(&record)
                .map_err(|e| PortalError::Write(e.to_string()))?;
        }

        state.last_created_at = Some(created_at);
        state.records.push(record.clone());

        debug!(id = %record.id, api_id = %record.api_id, "Log record appended");
        Ok(record)
    }
}

#[async_trait]
impl LogReader for MemoryLogStore {
    async fn recent(&self, api_id: &ValidId, limit: usize) -> Result<Vec<LogRecord>, PortalError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let state = self.lock(PortalError::Query)?;

        let mut matching: Vec<(usize, &LogRecord)> = state
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| &r.api_id == api_id.as_uuid())
            .collect();
        matching.sort_by_key(|(idx, r)| Reverse((r.created_at, *idx)));

        Ok(matching
            .into_iter()
            .take(limit)
            .map(|(_, r)| r.clone())
            .collect())
    }
}
