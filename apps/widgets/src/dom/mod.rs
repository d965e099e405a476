//! Host document seam.
//!
//! Widgets never reach for a global document. They receive a `&mut dyn Dom`
//! and address elements through opaque [`NodeId`] handles resolved once at
//! bind time. [`memory::MemoryDom`] backs the tests; `web::WebDom` binds the
//! same operations to `web-sys` when built for the browser.

pub mod memory;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

use std::rc::Rc;

/// Handle to an element owned by a [`Dom`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// What kind of form control an element is, for validation purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    File,
    Select,
    Text,
    Other,
}

/// Metadata of a file attached to an input or carried by a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Lowercased text after the last `.` of the name, if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Input,
    DragOver,
    DragLeave,
    Drop,
    Submit,
    Click,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Change => "change",
            EventKind::Input => "input",
            EventKind::DragOver => "dragover",
            EventKind::DragLeave => "dragleave",
            EventKind::Drop => "drop",
            EventKind::Submit => "submit",
            EventKind::Click => "click",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Capture,
    Bubble,
}

/// A dispatched event as seen by widget listeners.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    /// Files carried by a drop, empty for every other event.
    pub files: Vec<FileMeta>,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            files: Vec::new(),
            default_prevented: false,
        }
    }

    pub fn with_files(mut self, files: Vec<FileMeta>) -> Self {
        self.files = files;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type Listener = Rc<dyn Fn(&mut dyn Dom, &mut Event)>;
pub type ClipboardCallback = Box<dyn FnOnce(&mut dyn Dom, Result<(), String>)>;
pub type TimerCallback = Box<dyn FnOnce(&mut dyn Dom)>;

/// Operations the widgets need from the hosting document.
pub trait Dom {
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Resolves `#id`, `.class` or a bare tag name to the first match.
    fn query_selector(&self, selector: &str) -> Option<NodeId>;

    fn control_kind(&self, node: NodeId) -> ControlKind;

    fn value(&self, node: NodeId) -> String;

    /// Setting the value of a file input to `""` also clears its files.
    fn set_value(&mut self, node: NodeId, value: &str);

    fn files(&self, node: NodeId) -> Vec<FileMeta>;

    /// Copies the files carried by a drop event into a file input.
    fn assign_dropped_files(&mut self, input: NodeId, event: &Event);

    fn text(&self, node: NodeId) -> String;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn is_displayed(&self, node: NodeId) -> bool;

    fn set_displayed(&mut self, node: NodeId, displayed: bool);

    fn toggle_class(&mut self, node: NodeId, class: &str, on: bool);

    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    fn add_listener(&mut self, node: NodeId, kind: EventKind, phase: Phase, listener: Listener);

    /// Cell text of every row of a table, in document order.
    fn table_rows(&self, table: NodeId) -> Vec<Vec<String>>;

    /// Blocking, user-facing notification.
    fn alert(&mut self, message: &str);

    /// Starts an asynchronous clipboard write; `done` runs when it settles.
    fn write_clipboard(&mut self, text: String, done: ClipboardCallback);

    fn set_timeout(&mut self, delay_ms: u32, callback: TimerCallback);
}

/// Resolves a selector. A bare name is tried as an element id before a tag.
pub fn resolve(dom: &dyn Dom, selector: &str) -> Option<NodeId> {
    if selector.starts_with('#') || selector.starts_with('.') {
        return dom.query_selector(selector);
    }
    dom.element_by_id(selector)
        .or_else(|| dom.query_selector(selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(FileMeta::new("REPORT.PDF", 1).extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn test_extension_uses_last_dot() {
        assert_eq!(
            FileMeta::new("orders.2024.xlsx", 1).extension().as_deref(),
            Some("xlsx")
        );
    }

    #[test]
    fn test_extension_missing() {
        assert_eq!(FileMeta::new("pdf", 1).extension(), None);
        assert_eq!(FileMeta::new("trailing.", 1).extension(), None);
    }

    #[test]
    fn test_prevent_default_sticks() {
        let mut event = Event::new(EventKind::Drop);
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
    }
}
