//! Values pushed onto the data layer
//!
//! The container runtime accepts three shapes on the shared array: plain
//! event records, command tuples such as `["consent", "default", {...}]`, and
//! zero-argument functions it calls with the container as `this`.

use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;

/// Zero-argument callback executed by the container runtime, never by this crate
pub type QueueCallback = Rc<dyn Fn()>;

/// `[command, ...args]`
#[derive(Debug, Clone, PartialEq)]
pub struct CommandTuple {
    pub command: String,
    pub args: Vec<Value>,
}

impl CommandTuple {
    pub fn new(command: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Wire form: a JSON array with the command name first
    pub fn to_json(&self) -> Value {
        let mut items = Vec::with_capacity(self.args.len() + 1);
        items.push(Value::String(self.command.clone()));
        items.extend(self.args.iter().cloned());
        Value::Array(items)
    }
}

#[derive(Clone)]
pub enum QueueEntry {
    Record(Map<String, Value>),
    Command(CommandTuple),
    Callback(QueueCallback),
}

impl QueueEntry {
    /// `{"event": name}`
    pub fn event(name: impl Into<String>) -> Self {
        let mut record = Map::new();
        record.insert("event".to_string(), Value::String(name.into()));
        QueueEntry::Record(record)
    }

    pub fn command(command: impl Into<String>, args: Vec<Value>) -> Self {
        QueueEntry::Command(CommandTuple::new(command, args))
    }

    pub fn callback(callback: impl Fn() + 'static) -> Self {
        QueueEntry::Callback(Rc::new(callback))
    }

    /// Interpret a JSON value: objects become records, arrays led by a string
    /// become command tuples, anything else is rejected.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(record) => Some(QueueEntry::Record(record)),
            Value::Array(items) => {
                let mut items = items.into_iter();
                match items.next() {
                    Some(Value::String(command)) => Some(QueueEntry::Command(
                        CommandTuple::new(command, items.collect()),
                    )),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Wire form; callbacks have none
    pub fn to_json(&self) -> Option<Value> {
        match self {
            QueueEntry::Record(record) => Some(Value::Object(record.clone())),
            QueueEntry::Command(tuple) => Some(tuple.to_json()),
            QueueEntry::Callback(_) => None,
        }
    }

    /// Records without keys and commands without a name carry nothing the
    /// runtime could act on.
    pub fn is_empty(&self) -> bool {
        match self {
            QueueEntry::Record(record) => record.is_empty(),
            QueueEntry::Command(tuple) => tuple.command.is_empty(),
            QueueEntry::Callback(_) => false,
        }
    }

    pub fn as_record(&self) -> Option<&Map<String, Value>> {
        match self {
            QueueEntry::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_command(&self) -> Option<&CommandTuple> {
        match self {
            QueueEntry::Command(tuple) => Some(tuple),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for QueueEntry {
    fn from(record: Map<String, Value>) -> Self {
        QueueEntry::Record(record)
    }
}

impl From<CommandTuple> for QueueEntry {
    fn from(tuple: CommandTuple) -> Self {
        QueueEntry::Command(tuple)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (QueueEntry::Record(a), QueueEntry::Record(b)) => a == b,
            (QueueEntry::Command(a), QueueEntry::Command(b)) => a == b,
            (QueueEntry::Callback(a), QueueEntry::Callback(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for QueueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueEntry::Record(record) => f.debug_tuple("Record").field(record).finish(),
            QueueEntry::Command(tuple) => f.debug_tuple("Command").field(tuple).finish(),
            QueueEntry::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}
