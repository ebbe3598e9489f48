//! Debounced background persistence.
//!
//! Edits arrive in bursts, so each snapshot is held for a quiet window
//! before being written; a newer snapshot supersedes a pending one and
//! restarts the window. Persistence here is best-effort: the workspace
//! also writes through synchronously at the important moments (parse,
//! import, explicit save), so a failed or skipped autosave loses nothing
//! durable.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::core::storage::{Storage, DOCUMENT_KEY};

/// Quiet window after the last edit before the pending snapshot is written.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(800);

enum Msg {
    Save(String),
    Flush,
    Cancel,
}

/// Handle to the autosave worker. Dropping it flushes any pending snapshot
/// and joins the worker thread.
pub struct Autosaver {
    tx: Option<Sender<Msg>>,
    worker: Option<JoinHandle<()>>,
}

impl Autosaver {
    /// Spawns the worker for the store at `db_path`. The worker opens its
    /// own connection lazily, on the first write that comes due.
    pub fn spawn(db_path: PathBuf) -> Self {
        Self::spawn_with_delay(db_path, AUTOSAVE_DELAY)
    }

    fn spawn_with_delay(db_path: PathBuf, delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || run_worker(&rx, &db_path, delay));
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Queues `snapshot` to be written once the quiet window elapses,
    /// superseding any snapshot still pending.
    pub fn schedule(&self, snapshot: String) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Msg::Save(snapshot));
        }
    }

    /// Asks the worker to write any pending snapshot now.
    pub fn flush(&self) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Msg::Flush);
        }
    }

    /// Discards any pending snapshot without writing it. Used after a
    /// synchronous write-through has made the pending snapshot redundant.
    pub fn cancel(&self) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Msg::Cancel);
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        // Closing the channel wakes the worker, which writes whatever is
        // still pending before exiting.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(rx: &Receiver<Msg>, db_path: &Path, delay: Duration) {
    let mut storage: Option<Storage> = None;
    let mut pending: Option<String> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        let msg = match deadline {
            Some(due) => {
                let wait = due.saturating_duration_since(Instant::now());
                match rx.recv_timeout(wait) {
                    Ok(msg) => Some(msg),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match rx.recv() {
                Ok(msg) => Some(msg),
                Err(_) => break,
            },
        };

        match msg {
            Some(Msg::Save(snapshot)) => {
                pending = Some(snapshot);
                deadline = Some(Instant::now() + delay);
            }
            Some(Msg::Flush) | None => {
                if let Some(snapshot) = pending.take() {
                    write_snapshot(&mut storage, db_path, &snapshot);
                }
                deadline = None;
            }
            Some(Msg::Cancel) => {
                pending = None;
                deadline = None;
            }
        }
    }

    // Channel closed with a snapshot still pending: write it on the way out.
    if let Some(snapshot) = pending.take() {
        write_snapshot(&mut storage, db_path, &snapshot);
    }
}

fn write_snapshot(storage: &mut Option<Storage>, db_path: &Path, snapshot: &str) {
    if storage.is_none() {
        match Storage::open(db_path) {
            Ok(opened) => *storage = Some(opened),
            Err(e) => {
                log::warn!("autosave: cannot open {}: {e}", db_path.display());
                return;
            }
        }
    }
    if let Some(storage) = storage {
        match storage.put(DOCUMENT_KEY, snapshot) {
            Ok(()) => log::debug!("autosave: wrote {} bytes", snapshot.len()),
            Err(e) => log::warn!("autosave: write failed: {e}"),
        }
    }
}
