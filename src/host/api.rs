//! Public API for page hosts

pub use crate::host::error::{HostError, HostResult};
pub use crate::host::memory::{GlobalValue, MemoryHost};
pub use crate::host::traits::{
    Document, GlobalScope, ScriptElement, ScriptListener, ScriptMount, ScriptOutcome,
    MARKER_ATTRIBUTE,
};

#[cfg(feature = "browser")]
pub use crate::host::browser::BrowserHost;
