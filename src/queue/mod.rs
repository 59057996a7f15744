//! Data layer queue
//!
//! The data layer is the array the container runtime polls for events and
//! commands. This module models what goes onto it ([`api::QueueEntry`]), the
//! store that owns the shared array ([`api::QueueStore`]) and the buffer that
//! holds operations issued before the client is initialised
//! ([`api::PendingQueue`]).
//!
//! # Lifecycle
//!
//! ```text
//!  push / consent          init()                      teardown()
//!  ─────────────►  PendingQueue ──flush──► QueueStore ──restore──► snapshot
//!                                 ▲            │
//!                 bootstrap event ┘            ▼
//!                                       window[dataLayerName]
//! ```

pub(crate) mod entry;
pub(crate) mod error;
pub(crate) mod pending;
pub(crate) mod store;

pub mod api;

#[cfg(test)]
mod tests;
