/// In-memory render target.
///
/// Implements the surface traits over plain mutex-guarded state so the
/// portal can run headless: tests inspect it directly, and the console
/// binary uses it for form input.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::surface::{Element, Field, Form, SubmitEvent};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub html: String,
    pub text: String,
    pub class: String,
    pub visible: bool,
}

#[derive(Default)]
pub struct MemoryElement {
    state: Mutex<ElementState>,
    /// Every `set_inner_html` payload, oldest first.
    renders: Mutex<Vec<String>>,
}

impl MemoryElement {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn snapshot(&self) -> ElementState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn html(&self) -> String {
        self.snapshot().html
    }

    pub fn text(&self) -> String {
        self.snapshot().text
    }

    pub fn is_visible(&self) -> bool {
        self.snapshot().visible
    }

    pub fn renders(&self) -> Vec<String> {
        self.renders.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn update(&self, f: impl FnOnce(&mut ElementState)) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state);
    }
}

impl Element for MemoryElement {
    fn set_inner_html(&self, html: String) {
        self.renders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(html.clone());
        self.update(|s| s.html = html);
    }

    fn set_text(&self, text: &str) {
        self.update(|s| s.text = text.to_string());
    }

    fn set_class(&self, class: &str) {
        self.update(|s| s.class = class.to_string());
    }

    fn set_visible(&self, visible: bool) {
        self.update(|s| s.visible = visible);
    }
}

pub struct MemoryField {
    value: Mutex<String>,
    default: String,
}

impl MemoryField {
    pub fn new() -> Arc<Self> {
        Self::with_default("")
    }

    pub fn with_default(default: &str) -> Arc<Self> {
        Arc::new(Self {
            value: Mutex::new(default.to_string()),
            default: default.to_string(),
        })
    }

    fn restore_default(&self) {
        self.set_value(&self.default);
    }
}

impl Field for MemoryField {
    fn value(&self) -> String {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = value.to_string();
    }
}

/// A form owning a fixed set of fields.
pub struct MemoryForm {
    fields: Vec<Arc<MemoryField>>,
    resets: AtomicUsize,
}

impl MemoryForm {
    pub fn new(fields: Vec<Arc<MemoryField>>) -> Arc<Self> {
        Arc::new(Self {
            fields,
            resets: AtomicUsize::new(0),
        })
    }

    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::Relaxed)
    }
}

impl Form for MemoryForm {
    fn reset(&self) {
        for field in &self.fields {
            field.restore_default();
        }
        self.resets.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Default)]
pub struct MemorySubmit {
    prevented: AtomicBool,
}

impl MemorySubmit {
    pub fn default_prevented(&self) -> bool {
        self.prevented.load(Ordering::Relaxed)
    }
}

impl SubmitEvent for MemorySubmit {
    fn prevent_default(&self) {
        self.prevented.store(true, Ordering::Relaxed);
    }
}
