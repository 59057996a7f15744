//! Public API for the GTM client

pub use crate::client::config::ClientConfig;
pub use crate::client::error::{GtmError, GtmResult};
pub use crate::client::lifecycle::{
    bootstrap_event, create_client, Client, LifecycleState, BOOTSTRAP_EVENT,
};
pub use crate::core::logger::{LogFacade, Logger, MemoryLogger, NoopLogger};
pub use crate::core::time::{Clock, FixedClock, SystemClock};
