use std::sync::Arc;

/// A region of the page the portal writes into: a list container or a
/// status line.
pub trait Element: Send + Sync {
    /// Replace the element's children with `html`.
    fn set_inner_html(&self, html: String);
    fn set_text(&self, text: &str);
    fn set_class(&self, class: &str);
    fn set_visible(&self, visible: bool);
}

/// A single form input.
pub trait Field: Send + Sync {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// A form as a whole. `reset` restores every field to its default.
pub trait Form: Send + Sync {
    fn reset(&self);
}

/// The event a form submission arrives with.
pub trait SubmitEvent {
    /// Suppress the surface's own submission (page navigation/reload).
    fn prevent_default(&self);
}

pub type ElementRef = Arc<dyn Element>;
pub type FieldRef = Arc<dyn Field>;
pub type FormRef = Arc<dyn Form>;
