//! JSON-lines journal of call records.
//!
//! Every appended record becomes one line in the journal file; on startup
//! the journal is replayed into the in-memory log store so the monitor
//! survives restarts. The journal is only ever appended to. Retention and
//! pruning are left to whoever operates the file.

use mockport_core::log::LogRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Append-only writer for the call journal.
pub struct LogJournal {
    path: PathBuf,
    inner: Mutex<File>,
}

impl LogJournal {
    /// Open (or create) the journal file, creating parent directories.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        info!(path = %path.display(), "Call journal opened");

        Ok(Self {
            path,
            inner: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one record as a JSON line.
    ///
    /// The line goes to the file in a single unbuffered write. On failure the
    /// file is cut back to its previous length, so a failed record never
    /// shows up in a later replay and the next line starts clean.
    pub fn append(&self, record: &LogRecord) -> io::Result<()> {
        let mut line = serde_json::to_vec(record).map_err(io::Error::other)?;
        line.push(b'\n');

        let mut file = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("journal writer lock poisoned"))?;
        let committed = file.metadata()?.len();

        if let Err(e) = file.write_all(&line) {
            if let Err(trunc) = file.set_len(committed) {
                warn!(error = %trunc, path = %self.path.display(), "journal: could not drop partial line");
            }
            return Err(e);
        }
        Ok(())
    }
}

/// Read every record from a journal file, in file order.
///
/// * Missing file      → empty (first run).
/// * Malformed line    → skipped with a warning.
pub fn replay(path: &Path) -> io::Result<Vec<LogRecord>> {
    if !path.exists() {
        debug!(path = %path.display(), "journal: no file found, starting fresh");
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<LogRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!(error = %e, line = lineno + 1, path = %path.display(), "journal: malformed line skipped");
            }
        }
    }

    info!(records = records.len(), skipped, path = %path.display(), "journal: replayed");
    Ok(records)
}
