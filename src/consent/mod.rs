//! Consent Mode signalling
//!
//! Converts a consent state and optional region scoping into the
//! `["consent", kind, state, options?]` command the container runtime reads,
//! together with a signature used to coalesce commands queued before the
//! client is initialised. Nothing here decides consent; values are relayed
//! exactly as given.

pub(crate) mod command;
pub(crate) mod types;

pub mod api;

#[cfg(test)]
mod tests;
