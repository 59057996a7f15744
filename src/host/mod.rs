//! Page host abstraction
//!
//! The client never reaches for `window` or `document` directly. It talks to
//! a [`api::GlobalScope`] and a [`api::Document`], injected at construction:
//! [`api::MemoryHost`] for tests and server-side rendering, and
//! `BrowserHost` (behind the `browser` feature) for wasm builds running in a
//! real page.

pub(crate) mod error;
pub(crate) mod memory;
pub(crate) mod traits;

#[cfg(feature = "browser")]
pub(crate) mod browser;

pub mod api;

#[cfg(test)]
mod tests;
