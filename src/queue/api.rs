//! Public API for the data layer queue

pub use crate::queue::entry::{CommandTuple, QueueCallback, QueueEntry};
pub use crate::queue::error::{QueueError, QueueResult};
pub use crate::queue::pending::PendingQueue;
pub use crate::queue::store::{QueueSnapshot, QueueStore};
