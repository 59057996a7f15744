//! Aggregate readiness signalling
//!
//! Readiness is reached when every tracked container is terminal. It is
//! observable two ways: a future over a `tokio::sync::watch` channel of the
//! full state table, and one-shot callbacks registered with
//! [`crate::loader::api::ScriptLoader::on_ready`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tokio::sync::watch;

use crate::loader::state::{all_terminal, ScriptLoadState};

/// Called once with the full state table when readiness is reached
pub type ReadyCallback = Box<dyn FnOnce(&[ScriptLoadState])>;

type CallbackList = RefCell<Vec<(u64, ReadyCallback)>>;

pub(crate) struct ReadyRegistry {
    callbacks: Rc<CallbackList>,
    next_id: u64,
    publisher: watch::Sender<Vec<ScriptLoadState>>,
}

impl ReadyRegistry {
    pub(crate) fn new(initial: Vec<ScriptLoadState>) -> Self {
        let (publisher, _) = watch::channel(initial);
        Self {
            callbacks: Rc::new(RefCell::new(Vec::new())),
            next_id: 1,
            publisher,
        }
    }

    pub(crate) fn publish(&self, states: &[ScriptLoadState]) {
        self.publisher.send_replace(states.to_vec());
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Vec<ScriptLoadState>> {
        self.publisher.subscribe()
    }

    pub(crate) fn register(&mut self, callback: ReadyCallback) -> ReadySubscription {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.borrow_mut().push((id, callback));
        ReadySubscription {
            id,
            callbacks: Rc::downgrade(&self.callbacks),
        }
    }

    /// Remove and return every registered callback
    pub(crate) fn take_callbacks(&self) -> Vec<ReadyCallback> {
        self.callbacks
            .borrow_mut()
            .drain(..)
            .map(|(_, callback)| callback)
            .collect()
    }
}

/// Handle returned by `on_ready`
///
/// Dropping the handle does not unsubscribe; call [`ReadySubscription::unsubscribe`].
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct ReadySubscription {
    id: u64,
    callbacks: Weak<CallbackList>,
}

impl ReadySubscription {
    /// A subscription whose callback already ran
    pub(crate) fn inert() -> Self {
        Self {
            id: 0,
            callbacks: Weak::new(),
        }
    }

    /// Stop the callback from running; safe to call any number of times
    pub fn unsubscribe(&self) {
        if let Some(callbacks) = self.callbacks.upgrade() {
            callbacks.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }

    /// True while the callback is still waiting to run
    pub fn is_active(&self) -> bool {
        self.callbacks
            .upgrade()
            .map(|callbacks| callbacks.borrow().iter().any(|(id, _)| *id == self.id))
            .unwrap_or(false)
    }
}

/// Resolve with the first state table in which every container is terminal
///
/// Never fails: if the loader goes away first, the last published table is
/// returned as-is.
pub(crate) async fn wait_until_ready(
    mut receiver: watch::Receiver<Vec<ScriptLoadState>>,
) -> Vec<ScriptLoadState> {
    let outcome = receiver
        .wait_for(|states| all_terminal(states))
        .await
        .map(|states| states.clone());

    match outcome {
        Ok(states) => states,
        Err(_) => receiver.borrow().clone(),
    }
}
