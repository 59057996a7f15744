//! QueueStore - sole owner of the shared data layer array
//!
//! The array bound on the global scope is the one piece of mutable state the
//! client shares with the page: inline bootstrap snippets may have pushed to
//! it before we load, and the container runtime keeps appending to it after.
//! Every read and write goes through this type so claiming and restoring stay
//! symmetric.

use std::rc::Rc;

use crate::host::traits::GlobalScope;
use crate::queue::entry::QueueEntry;
use crate::queue::error::{QueueError, QueueResult};

/// State of the global binding at the moment it was claimed
#[derive(Debug, Clone, PartialEq)]
pub struct QueueSnapshot {
    /// Whether an array was already bound under the name
    pub existed: bool,
    /// Copy of the entries present at claim time
    pub prior_entries: Vec<QueueEntry>,
    pub prior_length: usize,
}

pub struct QueueStore {
    name: String,
    scope: Rc<dyn GlobalScope>,
    /// Held from `claim` until `restore`; never retaken while held
    snapshot: Option<QueueSnapshot>,
}

impl QueueStore {
    pub fn new(name: impl Into<String>, scope: Rc<dyn GlobalScope>) -> Self {
        Self {
            name: name.into(),
            scope,
            snapshot: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_claimed(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&QueueSnapshot> {
        self.snapshot.as_ref()
    }

    /// Claim the global array, creating it when absent
    ///
    /// An existing array is left untouched. Claiming again while a snapshot
    /// is held returns the original snapshot.
    pub fn claim(&mut self) -> QueueResult<&QueueSnapshot> {
        if self.snapshot.is_none() {
            let snapshot = match self.scope.queue_entries(&self.name) {
                Some(prior_entries) => QueueSnapshot {
                    existed: true,
                    prior_length: prior_entries.len(),
                    prior_entries,
                },
                None => {
                    self.scope.create_queue(&self.name)?;
                    QueueSnapshot {
                        existed: false,
                        prior_entries: Vec::new(),
                        prior_length: 0,
                    }
                }
            };
            log::trace!(
                "Claimed data layer '{}' (existed: {}, prior length: {})",
                self.name,
                snapshot.existed,
                snapshot.prior_length
            );
            self.snapshot = Some(snapshot);
        }

        self.snapshot.as_ref().ok_or_else(|| QueueError::NotClaimed {
            name: self.name.clone(),
        })
    }

    /// Append to the live array
    pub fn push(&self, entry: QueueEntry) -> QueueResult<()> {
        if self.snapshot.is_none() {
            return Err(QueueError::NotClaimed {
                name: self.name.clone(),
            });
        }
        self.scope.push_entry(&self.name, entry)?;
        Ok(())
    }

    /// Undo the claim
    ///
    /// A binding created by `claim` is deleted; a pre-existing array is
    /// truncated back to its claim-time length, keeping earlier entries.
    /// Returns the snapshot that was released, if any.
    pub fn restore(&mut self) -> Option<QueueSnapshot> {
        let snapshot = self.snapshot.take()?;
        if snapshot.existed {
            self.scope.truncate_queue(&self.name, snapshot.prior_length);
        } else {
            self.scope.delete_global(&self.name);
        }
        log::trace!(
            "Restored data layer '{}' (existed: {}, length: {})",
            self.name,
            snapshot.existed,
            snapshot.prior_length
        );
        Some(snapshot)
    }
}
