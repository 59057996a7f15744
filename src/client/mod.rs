//! GTM client
//!
//! Composes the queue store, pending queue, consent builder and script
//! loader behind a small lifecycle: construct with a validated
//! [`api::ClientConfig`], buffer operations, `init()`, then `teardown()`.

pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod lifecycle;

pub mod api;

#[cfg(test)]
mod tests;
