//! Buffering progress writes at the persistence boundary.

use crate::{ProgressId, ProgressRecord, ProgressStore, ProgressUpdate, StoreError};

/// Pending writes for one progress record.
///
/// Updates pushed while a write is outstanding or failing are merged, so the next
/// successful flush carries the latest value of every changed field. A flush that
/// fails because the store is unavailable keeps the update for the next attempt; the
/// in-memory game is never rolled back.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use crossword_core::PuzzleId;
/// use crossword_store::{MemoryStore, ProgressStore, ProgressUpdate, UpdateQueue};
///
/// let mut store = MemoryStore::with_sample_data()?;
/// let record = store.create_progress(PuzzleId::new(1), Utc::now())?;
///
/// let mut queue = UpdateQueue::new(record.id);
/// queue.push(ProgressUpdate { reveals_used: Some(2), ..ProgressUpdate::default() });
/// let written = queue.flush(&mut store)?.unwrap();
/// assert_eq!(written.snapshot.reveals_used, 2);
/// assert!(queue.is_idle());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQueue {
    progress_id: ProgressId,
    pending: Option<ProgressUpdate>,
    failed_attempts: u32,
}

impl UpdateQueue {
    /// Creates an empty queue for the record `progress_id`.
    #[must_use]
    pub const fn new(progress_id: ProgressId) -> Self {
        Self {
            progress_id,
            pending: None,
            failed_attempts: 0,
        }
    }

    /// Returns the record this queue writes to.
    #[must_use]
    pub const fn progress_id(&self) -> ProgressId {
        self.progress_id
    }

    /// Returns the update waiting to be written.
    #[must_use]
    pub const fn pending(&self) -> Option<&ProgressUpdate> {
        self.pending.as_ref()
    }

    /// Returns `true` if nothing is waiting to be written.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Returns the number of consecutive failed flushes.
    #[must_use]
    pub const fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Merges `update` into the pending update. Empty updates are dropped.
    pub fn push(&mut self, update: ProgressUpdate) {
        if update.is_empty() {
            return;
        }
        match &mut self.pending {
            Some(pending) => pending.merge(update),
            None => self.pending = Some(update),
        }
    }

    /// Writes the pending update.
    ///
    /// Returns `Ok(None)` if nothing was pending.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails. The update stays pending when the
    /// store is [unavailable](StoreError::Unavailable) and is dropped for any other
    /// error, since retrying it cannot succeed.
    pub fn flush(
        &mut self,
        store: &mut impl ProgressStore,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        let Some(update) = &self.pending else {
            return Ok(None);
        };
        match store.update_progress(self.progress_id, update) {
            Ok(record) => {
                self.pending = None;
                self.failed_attempts = 0;
                Ok(Some(record))
            }
            Err(err) if err.is_unavailable() => {
                self.failed_attempts = self.failed_attempts.saturating_add(1);
                log::warn!(
                    "failed to save progress {} (attempt {}): {err}",
                    self.progress_id,
                    self.failed_attempts
                );
                Err(err)
            }
            Err(err) => {
                log::warn!("discarding progress update for {}: {err}", self.progress_id);
                self.pending = None;
                self.failed_attempts = 0;
                Err(err)
            }
        }
    }
}
