//! Debounced notes auto-save.
//!
//! Edits replace a single pending buffer; the buffer is written once no edit
//! has arrived for the quiet period. A burst of keystrokes costs one
//! `update_notes` call carrying the last text.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::SessionService;

/// Handle to a running auto-save task.
///
/// Dropping the handle without [`NotesAutosave::close`] still flushes the
/// pending buffer; the task exits once that write finishes.
pub struct NotesAutosave {
    buffer: watch::Sender<String>,
    task: JoinHandle<()>,
}

impl NotesAutosave {
    /// How long the editor must be idle before a save goes out.
    pub const DEFAULT_QUIET: Duration = Duration::from_secs(1);

    /// Start the auto-save task on the current tokio runtime.
    #[must_use]
    pub fn spawn(service: Arc<dyn SessionService>, quiet: Duration) -> Self {
        let (buffer, rx) = watch::channel(String::new());
        let task = tokio::spawn(run(service, rx, quiet));
        Self { buffer, task }
    }

    /// Replace the pending buffer and restart the quiet period.
    pub fn edit(&self, text: impl Into<String>) {
        self.buffer.send_replace(text.into());
    }

    /// Flush whatever is pending and wait for the task to finish.
    pub async fn close(self) {
        drop(self.buffer);
        if let Err(err) = self.task.await {
            warn!("Notes auto-save task ended abnormally: {err}");
        }
    }
}

async fn run(service: Arc<dyn SessionService>, mut rx: watch::Receiver<String>, quiet: Duration) {
    // Each pass waits for a first edit, then for the editor to go quiet.
    while rx.changed().await.is_ok() {
        loop {
            match tokio::time::timeout(quiet, rx.changed()).await {
                Ok(Ok(())) => {}
                // Quiet period elapsed, or the editor closed mid-burst.
                Err(_) | Ok(Err(_)) => break,
            }
        }

        let text = rx.borrow_and_update().clone();
        if text.is_empty() {
            debug!("Skipping auto-save of empty notes");
            continue;
        }
        if let Err(err) = service.update_notes(text).await {
            warn!("Notes auto-save failed: {err}");
        }
    }
}
