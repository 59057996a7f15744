//! In-memory page model
//!
//! `MemoryHost` implements both [`GlobalScope`] and [`Document`] without a
//! browser. Tests drive script events by hand through [`MemoryHost::fire_load`]
//! and [`MemoryHost::fire_error`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::host::error::{HostError, HostResult};
use crate::host::traits::{
    Document, GlobalScope, ScriptElement, ScriptListener, ScriptMount, ScriptOutcome,
};
use crate::queue::api::QueueEntry;

/// Value bound to a global name
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalValue {
    Queue(Vec<QueueEntry>),
    Value(serde_json::Value),
}

struct MountedScript {
    element: ScriptElement,
    mount: ScriptMount,
    listener: Option<ScriptListener>,
}

pub struct MemoryHost {
    globals: RefCell<HashMap<String, GlobalValue>>,
    scripts: RefCell<Vec<MountedScript>>,
    head: Cell<bool>,
    body: Cell<bool>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// A page with both `<head>` and `<body>` and no globals
    pub fn new() -> Self {
        Self {
            globals: RefCell::new(HashMap::new()),
            scripts: RefCell::new(Vec::new()),
            head: Cell::new(true),
            body: Cell::new(true),
        }
    }

    pub fn set_head_available(&self, available: bool) {
        self.head.set(available);
    }

    pub fn set_body_available(&self, available: bool) {
        self.body.set(available);
    }

    /// Bind `name` to an array holding `entries`, as an inline snippet would
    pub fn seed_queue(&self, name: &str, entries: Vec<QueueEntry>) {
        self.globals
            .borrow_mut()
            .insert(name.to_string(), GlobalValue::Queue(entries));
    }

    /// Bind `name` to a non-array value
    pub fn set_global(&self, name: &str, value: serde_json::Value) {
        self.globals
            .borrow_mut()
            .insert(name.to_string(), GlobalValue::Value(value));
    }

    pub fn global(&self, name: &str) -> Option<GlobalValue> {
        self.globals.borrow().get(name).cloned()
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.globals.borrow().contains_key(name)
    }

    /// Live contents of the array bound to `name`
    pub fn entries(&self, name: &str) -> Vec<QueueEntry> {
        self.queue_entries(name).unwrap_or_default()
    }

    /// Attached script elements in document order
    pub fn scripts(&self) -> Vec<ScriptElement> {
        self.scripts
            .borrow()
            .iter()
            .map(|script| script.element.clone())
            .collect()
    }

    pub fn script(&self, container_id: &str) -> Option<ScriptElement> {
        self.scripts
            .borrow()
            .iter()
            .find(|script| script.element.container_id == container_id)
            .map(|script| script.element.clone())
    }

    /// Number of attached elements carrying the marker for `container_id`
    pub fn script_count(&self, container_id: &str) -> usize {
        self.scripts
            .borrow()
            .iter()
            .filter(|script| script.element.container_id == container_id)
            .count()
    }

    pub fn mount_of(&self, container_id: &str) -> Option<ScriptMount> {
        self.scripts
            .borrow()
            .iter()
            .find(|script| script.element.container_id == container_id)
            .map(|script| script.mount)
    }

    /// Attach an element nobody is listening to, like a server-rendered tag
    pub fn insert_foreign_script(&self, element: ScriptElement) {
        self.scripts.borrow_mut().push(MountedScript {
            element,
            mount: ScriptMount::Head,
            listener: None,
        });
    }

    /// Deliver a `load` event; false when no listener was waiting
    pub fn fire_load(&self, container_id: &str) -> bool {
        self.fire(container_id, ScriptOutcome::Loaded)
    }

    /// Deliver an `error` event; false when no listener was waiting
    pub fn fire_error(&self, container_id: &str, message: &str) -> bool {
        self.fire(container_id, ScriptOutcome::Failed(message.to_string()))
    }

    fn fire(&self, container_id: &str, outcome: ScriptOutcome) -> bool {
        // Release the borrow before calling out: listeners may touch the host
        let listener = self
            .scripts
            .borrow_mut()
            .iter_mut()
            .find(|script| script.element.container_id == container_id)
            .and_then(|script| script.listener.take());

        match listener {
            Some(listener) => {
                listener(outcome);
                true
            }
            None => false,
        }
    }
}

impl GlobalScope for MemoryHost {
    fn queue_entries(&self, name: &str) -> Option<Vec<QueueEntry>> {
        match self.globals.borrow().get(name) {
            Some(GlobalValue::Queue(entries)) => Some(entries.clone()),
            _ => None,
        }
    }

    fn create_queue(&self, name: &str) -> HostResult<()> {
        self.globals
            .borrow_mut()
            .insert(name.to_string(), GlobalValue::Queue(Vec::new()));
        Ok(())
    }

    fn push_entry(&self, name: &str, entry: QueueEntry) -> HostResult<()> {
        match self.globals.borrow_mut().get_mut(name) {
            Some(GlobalValue::Queue(entries)) => {
                entries.push(entry);
                Ok(())
            }
            _ => Err(HostError::MissingQueue {
                name: name.to_string(),
            }),
        }
    }

    fn truncate_queue(&self, name: &str, len: usize) {
        if let Some(GlobalValue::Queue(entries)) = self.globals.borrow_mut().get_mut(name) {
            entries.truncate(len);
        }
    }

    fn delete_global(&self, name: &str) {
        self.globals.borrow_mut().remove(name);
    }
}

impl Document for MemoryHost {
    fn has_script(&self, container_id: &str) -> bool {
        self.script_count(container_id) > 0
    }

    fn has_head(&self) -> bool {
        self.head.get()
    }

    fn has_body(&self) -> bool {
        self.body.get()
    }

    fn append_script(
        &self,
        element: ScriptElement,
        mount: ScriptMount,
        listener: ScriptListener,
    ) -> HostResult<()> {
        let available = match mount {
            ScriptMount::Head => self.head.get(),
            ScriptMount::Body => self.body.get(),
        };
        if !available {
            return Err(HostError::NoMountPoint);
        }

        self.scripts.borrow_mut().push(MountedScript {
            element,
            mount,
            listener: Some(listener),
        });
        Ok(())
    }

    fn remove_script(&self, container_id: &str) -> bool {
        let mut scripts = self.scripts.borrow_mut();
        let before = scripts.len();
        scripts.retain(|script| script.element.container_id != container_id);
        scripts.len() != before
    }
}
