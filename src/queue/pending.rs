//! Pending Operation Queue
//!
//! Buffers pushes and consent commands issued before the client is
//! initialised. Ordinary entries keep insertion order. A consent command
//! whose signature is already queued replaces the queued one in place: the
//! newest value wins, but it keeps the slot of the first insertion so a late
//! default never jumps ahead of events queued in between.

use crate::consent::api::ConsentCommand;
use crate::queue::entry::QueueEntry;
use crate::queue::error::QueueResult;
use crate::queue::store::QueueStore;

#[derive(Debug, Clone)]
struct PendingOp {
    entry: QueueEntry,
    signature: Option<String>,
}

#[derive(Debug, Default)]
pub struct PendingQueue {
    ops: Vec<PendingOp>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Entries in delivery order
    pub fn entries(&self) -> impl Iterator<Item = &QueueEntry> {
        self.ops.iter().map(|op| &op.entry)
    }

    pub fn enqueue(&mut self, entry: QueueEntry) {
        self.ops.push(PendingOp {
            entry,
            signature: None,
        });
    }

    /// Queue a consent command, coalescing with a queued one of the same
    /// signature. Returns true when an earlier command was replaced.
    pub fn enqueue_consent(&mut self, command: ConsentCommand) -> bool {
        let signature = command.signature.clone();
        let existing = self
            .ops
            .iter_mut()
            .find(|op| op.signature.as_deref() == Some(signature.as_str()));

        match existing {
            Some(op) => {
                op.entry = command.into_entry();
                true
            }
            None => {
                self.ops.push(PendingOp {
                    entry: command.into_entry(),
                    signature: Some(signature),
                });
                false
            }
        }
    }

    /// Deliver every buffered entry to the store in order, then empty the buffer
    ///
    /// Stops at the first entry the store refuses and keeps the whole buffer,
    /// so a later flush replays it from the start.
    pub fn flush(&mut self, store: &QueueStore) -> QueueResult<usize> {
        for op in &self.ops {
            store.push(op.entry.clone())?;
        }
        let count = self.ops.len();
        self.ops.clear();
        Ok(count)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}
