//! Seams between the client and the page it runs in
//!
//! [`GlobalScope`] stands in for `window` and is only ever touched by the
//! queue store. [`Document`] stands in for `document` and is only ever touched
//! by the script loader. Both take `&self`: hosts are shared behind `Rc` and
//! keep their own interior mutability, matching the single-threaded page
//! model.

use crate::host::error::HostResult;
use crate::queue::api::QueueEntry;

/// Attribute carrying the container id on every injected script element
pub const MARKER_ATTRIBUTE: &str = "data-gtm-container";

/// Where a script element is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMount {
    Head,
    Body,
}

/// Terminal outcome reported by the host for a script element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Loaded,
    Failed(String),
}

/// One-shot observer for a script element's `load`/`error` event
///
/// Hosts must drop the listener when the element is removed, so events
/// arriving after removal are never delivered.
pub type ScriptListener = Box<dyn FnOnce(ScriptOutcome)>;

/// Description of a `<script>` element to be created by a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptElement {
    pub container_id: String,
    pub src: String,
    /// Attributes in insertion order; an empty value renders as a boolean
    /// attribute (`async`, `defer`).
    pub attributes: Vec<(String, String)>,
}

impl ScriptElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Server-side markup for this element
    pub fn to_html(&self) -> String {
        let mut html = format!("<script src=\"{}\"", escape_attribute(&self.src));
        for (name, value) in &self.attributes {
            if value.is_empty() {
                html.push_str(&format!(" {}", name));
            } else {
                html.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
            }
        }
        html.push_str("></script>");
        html
    }
}

/// Escape a value for a double-quoted HTML attribute
///
/// Only `"` needs escaping inside a double-quoted value; `&` is left alone
/// so URLs keep their exact query strings.
pub(crate) fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// The page's global object, as seen by the queue store
pub trait GlobalScope {
    /// Copy of the array bound to `name`, if it is an array
    fn queue_entries(&self, name: &str) -> Option<Vec<QueueEntry>>;

    /// Bind `name` to a new empty array, replacing any non-array value
    fn create_queue(&self, name: &str) -> HostResult<()>;

    /// Append to the array bound to `name`
    fn push_entry(&self, name: &str, entry: QueueEntry) -> HostResult<()>;

    /// Shrink the array bound to `name` to at most `len` entries
    fn truncate_queue(&self, name: &str, len: usize);

    /// Remove the `name` binding entirely
    fn delete_global(&self, name: &str);
}

/// The page's document, as seen by the script loader
pub trait Document {
    /// True when a script carrying the marker for `container_id` is attached
    fn has_script(&self, container_id: &str) -> bool;

    fn has_head(&self) -> bool;

    fn has_body(&self) -> bool;

    /// Create and attach the element, wiring `listener` to its load/error events
    fn append_script(
        &self,
        element: ScriptElement,
        mount: ScriptMount,
        listener: ScriptListener,
    ) -> HostResult<()>;

    /// Detach the marked element and its listener; false when nothing was attached
    fn remove_script(&self, container_id: &str) -> bool;
}
