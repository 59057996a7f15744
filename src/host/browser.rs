//! Real page host for wasm builds
//!
//! Data layer entries cross into JavaScript as plain values: records and
//! command tuples through `JSON.parse`, callbacks as JS functions. Entries
//! read back from the page go the other way; anything that is neither an
//! object, an array nor a function becomes an empty record so the snapshot
//! length still matches the live array.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect, JSON};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::host::error::{HostError, HostResult};
use crate::host::traits::{
    Document, GlobalScope, ScriptElement, ScriptListener, ScriptMount, ScriptOutcome,
    MARKER_ATTRIBUTE,
};
use crate::queue::api::QueueEntry;

struct AttachedScript {
    element: web_sys::Element,
    on_load: Closure<dyn FnMut()>,
    on_error: Closure<dyn FnMut(web_sys::Event)>,
}

pub struct BrowserHost {
    window: web_sys::Window,
    document: web_sys::Document,
    attached: RefCell<HashMap<String, AttachedScript>>,
}

fn js_failure(context: &str, value: JsValue) -> HostError {
    HostError::OperationFailed {
        message: format!("{}: {:?}", context, value),
    }
}

impl BrowserHost {
    pub fn new() -> HostResult<Self> {
        let window = web_sys::window().ok_or_else(|| HostError::OperationFailed {
            message: "no global window".to_string(),
        })?;
        let document = window.document().ok_or_else(|| HostError::OperationFailed {
            message: "window has no document".to_string(),
        })?;
        Ok(Self {
            window,
            document,
            attached: RefCell::new(HashMap::new()),
        })
    }

    fn array(&self, name: &str) -> Option<Array> {
        Reflect::get(&self.window, &JsValue::from_str(name))
            .ok()
            .filter(Array::is_array)
            .map(|value| value.unchecked_into::<Array>())
    }

    fn find_script(&self, container_id: &str) -> Option<web_sys::Element> {
        let selector = format!("script[{}=\"{}\"]", MARKER_ATTRIBUTE, container_id);
        self.document.query_selector(&selector).ok().flatten()
    }
}

fn entry_from_js(value: JsValue) -> QueueEntry {
    if let Some(function) = value.dyn_ref::<Function>() {
        let function = function.clone();
        return QueueEntry::callback(move || {
            let _ = function.call0(&JsValue::NULL);
        });
    }
    JSON::stringify(&value)
        .ok()
        .and_then(|text| text.as_string())
        .and_then(|text| serde_json::from_str(&text).ok())
        .and_then(QueueEntry::from_json)
        .unwrap_or_else(|| QueueEntry::Record(serde_json::Map::new()))
}

fn entry_to_js(entry: QueueEntry) -> HostResult<JsValue> {
    match entry {
        QueueEntry::Callback(callback) => {
            let closure = Closure::<dyn Fn()>::new(move || callback());
            Ok(closure.into_js_value())
        }
        other => {
            let value = other.to_json().unwrap_or(serde_json::Value::Null);
            let text = serde_json::to_string(&value).map_err(|e| HostError::OperationFailed {
                message: e.to_string(),
            })?;
            JSON::parse(&text).map_err(|e| js_failure("JSON.parse failed", e))
        }
    }
}

impl GlobalScope for BrowserHost {
    fn queue_entries(&self, name: &str) -> Option<Vec<QueueEntry>> {
        self.array(name)
            .map(|array| array.iter().map(entry_from_js).collect())
    }

    fn create_queue(&self, name: &str) -> HostResult<()> {
        Reflect::set(&self.window, &JsValue::from_str(name), &Array::new())
            .map_err(|e| js_failure("cannot bind data layer", e))?;
        Ok(())
    }

    fn push_entry(&self, name: &str, entry: QueueEntry) -> HostResult<()> {
        let array = self.array(name).ok_or_else(|| HostError::MissingQueue {
            name: name.to_string(),
        })?;
        // Call the live push: the container runtime replaces it after loading
        let push = Reflect::get(&array, &JsValue::from_str("push"))
            .map_err(|e| js_failure("data layer has no push", e))?;
        let push: Function = push
            .dyn_into()
            .map_err(|e| js_failure("data layer push is not a function", e))?;
        push.call1(&array, &entry_to_js(entry)?)
            .map_err(|e| js_failure("data layer push threw", e))?;
        Ok(())
    }

    fn truncate_queue(&self, name: &str, len: usize) {
        if let Some(array) = self.array(name) {
            if (array.length() as usize) > len {
                array.set_length(len as u32);
            }
        }
    }

    fn delete_global(&self, name: &str) {
        let _ = Reflect::delete_property(self.window.as_ref(), &JsValue::from_str(name));
    }
}

impl Document for BrowserHost {
    fn has_script(&self, container_id: &str) -> bool {
        self.find_script(container_id).is_some()
    }

    fn has_head(&self) -> bool {
        self.document.head().is_some()
    }

    fn has_body(&self) -> bool {
        self.document.body().is_some()
    }

    fn append_script(
        &self,
        element: ScriptElement,
        mount: ScriptMount,
        listener: ScriptListener,
    ) -> HostResult<()> {
        let script = self
            .document
            .create_element("script")
            .map_err(|e| js_failure("cannot create script element", e))?;
        script
            .set_attribute("src", &element.src)
            .map_err(|e| js_failure("cannot set src", e))?;
        for (name, value) in &element.attributes {
            script
                .set_attribute(name, value)
                .map_err(|e| js_failure("cannot set attribute", e))?;
        }

        let slot = Rc::new(RefCell::new(Some(listener)));
        let load_slot = Rc::clone(&slot);
        let on_load = Closure::<dyn FnMut()>::new(move || {
            let listener = load_slot.borrow_mut().take();
            if let Some(listener) = listener {
                listener(ScriptOutcome::Loaded);
            }
        });
        let src = element.src.clone();
        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let listener = slot.borrow_mut().take();
            if let Some(listener) = listener {
                listener(ScriptOutcome::Failed(format!("Failed to load {}", src)));
            }
        });
        script
            .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
            .map_err(|e| js_failure("cannot observe load", e))?;
        script
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .map_err(|e| js_failure("cannot observe error", e))?;

        let parent: web_sys::Node = match mount {
            ScriptMount::Head => self.document.head().map(web_sys::Node::from),
            ScriptMount::Body => self.document.body().map(web_sys::Node::from),
        }
        .ok_or(HostError::NoMountPoint)?;
        parent
            .append_child(&script)
            .map_err(|e| js_failure("cannot attach script", e))?;

        self.attached.borrow_mut().insert(
            element.container_id,
            AttachedScript {
                element: script,
                on_load,
                on_error,
            },
        );
        Ok(())
    }

    fn remove_script(&self, container_id: &str) -> bool {
        let tracked = self.attached.borrow_mut().remove(container_id);
        let element = match tracked {
            Some(attached) => {
                let _ = attached.element.remove_event_listener_with_callback(
                    "load",
                    attached.on_load.as_ref().unchecked_ref(),
                );
                let _ = attached.element.remove_event_listener_with_callback(
                    "error",
                    attached.on_error.as_ref().unchecked_ref(),
                );
                Some(attached.element)
            }
            None => self.find_script(container_id),
        };

        match element {
            Some(element) => {
                element.remove();
                true
            }
            None => false,
        }
    }
}
