//! Container script loading
//!
//! Builds GTM script and noscript URLs, injects one script element per
//! container through a [`crate::host::api::Document`], and tracks each load to
//! a terminal state. Aggregate readiness is exposed both as a future and as
//! one-shot callbacks.

pub(crate) mod container;
pub(crate) mod markup;
pub(crate) mod readiness;
pub(crate) mod script;
pub(crate) mod state;

pub mod api;

#[cfg(test)]
mod tests;
