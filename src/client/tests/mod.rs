//! Test modules for the GTM client
//!
//! Tests are organized by component.


use serde_json::Value;
use std::rc::Rc;

use crate::client::api::{create_client, Client, ClientConfig, FixedClock, MemoryLogger};
use crate::host::api::MemoryHost;
use crate::queue::api::QueueEntry;

pub(super) const START_MILLIS: i64 = 1_700_000_000_000;

/// Client on `host` with a recording logger and a fixed clock
pub(super) fn client_on(host: &Rc<MemoryHost>, config: ClientConfig) -> (Client, Rc<MemoryLogger>) {
    let logger = Rc::new(MemoryLogger::new());
    let client = create_client(config, host.clone())
        .unwrap()
        .with_logger(logger.clone())
        .with_clock(Rc::new(FixedClock::new(START_MILLIS)));
    (client, logger)
}

pub(super) fn record(value: Value) -> QueueEntry {
    QueueEntry::from_json(value).unwrap()
}

/// Live data layer contents as JSON, callbacks rendered as `null`
pub(super) fn live(host: &MemoryHost, name: &str) -> Vec<Value> {
    host.entries(name)
        .iter()
        .map(|entry| entry.to_json().unwrap_or(Value::Null))
        .collect()
}
