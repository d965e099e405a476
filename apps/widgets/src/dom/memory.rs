//! In-process document used to drive widgets without a browser.

use std::collections::{BTreeSet, VecDeque};

use super::{
    ClipboardCallback, ControlKind, Dom, Event, EventKind, FileMeta, Listener, NodeId, Phase,
    TimerCallback,
};

#[derive(Debug, Default)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    kind: Option<ControlKind>,
    value: String,
    files: Vec<FileMeta>,
    text: String,
    displayed: bool,
    disabled: bool,
    rows: Vec<Vec<String>>,
}

struct Registration {
    node: NodeId,
    kind: EventKind,
    phase: Phase,
    listener: Listener,
}

struct Timer {
    due_ms: u64,
    seq: u64,
    callback: TimerCallback,
}

/// Deterministic document: events dispatch synchronously, clipboard writes
/// stay pending until [`MemoryDom::settle_clipboard`], timers run on
/// [`MemoryDom::advance`].
#[derive(Default)]
pub struct MemoryDom {
    elements: Vec<Element>,
    listeners: Vec<Registration>,
    alerts: Vec<String>,
    clipboard: Option<String>,
    clipboard_writes: usize,
    pending_clipboard: VecDeque<(String, ClipboardCallback)>,
    timers: Vec<Timer>,
    timer_seq: u64,
    now_ms: u64,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element. Recognized attributes: `id`, `class`
    /// (space-separated), `type`, `value`, `style` (`display:none` hides),
    /// `disabled`.
    pub fn insert(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let tag = tag.to_ascii_lowercase();
        let mut element = Element {
            tag: tag.clone(),
            displayed: true,
            ..Element::default()
        };
        let mut input_type = None;
        for (name, value) in attrs {
            match *name {
                "id" => element.id = Some(value.to_string()),
                "class" => element
                    .classes
                    .extend(value.split_whitespace().map(String::from)),
                "type" => input_type = Some(value.to_ascii_lowercase()),
                "value" => element.value = value.to_string(),
                "style" => {
                    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
                    element.displayed = !compact.contains("display:none");
                }
                "disabled" => element.disabled = true,
                _ => {}
            }
        }
        element.kind = match (tag.as_str(), input_type.as_deref()) {
            ("input", Some("file")) => Some(ControlKind::File),
            ("input", _) | ("textarea", _) => Some(ControlKind::Text),
            ("select", _) => Some(ControlKind::Select),
            _ => Some(ControlKind::Other),
        };
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    /// Replaces a table's rows.
    pub fn set_rows(&mut self, table: NodeId, rows: Vec<Vec<String>>) {
        self.element_mut(table).rows = rows;
    }

    /// Delivers an event to `node`: capture listeners first, then bubble.
    pub fn dispatch(&mut self, node: NodeId, mut event: Event) -> Event {
        let mut ordered: Vec<Listener> = Vec::new();
        for phase in [Phase::Capture, Phase::Bubble] {
            ordered.extend(
                self.listeners
                    .iter()
                    .filter(|r| r.node == node && r.kind == event.kind && r.phase == phase)
                    .map(|r| r.listener.clone()),
            );
        }
        for listener in ordered {
            listener(self, &mut event);
        }
        event
    }

    /// Attaches files to a file input as the file dialog would, then fires
    /// `change`.
    pub fn choose_files(&mut self, input: NodeId, files: Vec<FileMeta>) -> Event {
        self.element_mut(input).files = files;
        self.dispatch(input, Event::new(EventKind::Change))
    }

    pub fn drop_files(&mut self, target: NodeId, files: Vec<FileMeta>) -> Event {
        self.dispatch(target, Event::new(EventKind::Drop).with_files(files))
    }

    pub fn type_text(&mut self, node: NodeId, value: &str) -> Event {
        self.element_mut(node).value = value.to_string();
        self.dispatch(node, Event::new(EventKind::Input))
    }

    pub fn choose_option(&mut self, select: NodeId, value: &str) -> Event {
        self.element_mut(select).value = value.to_string();
        self.dispatch(select, Event::new(EventKind::Change))
    }

    pub fn click(&mut self, node: NodeId) -> Event {
        self.dispatch(node, Event::new(EventKind::Click))
    }

    pub fn submit(&mut self, form: NodeId) -> Event {
        self.dispatch(form, Event::new(EventKind::Submit))
    }

    /// Settles the oldest pending clipboard write. Returns `false` when none
    /// was pending.
    pub fn settle_clipboard(&mut self, outcome: Result<(), String>) -> bool {
        let Some((text, done)) = self.pending_clipboard.pop_front() else {
            return false;
        };
        if outcome.is_ok() {
            self.clipboard = Some(text);
        }
        done(self, outcome);
        true
    }

    /// Moves the clock forward, running every timer that comes due in order.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due_ms <= self.now_ms)
                .min_by_key(|(_, t)| (t.due_ms, t.seq))
                .map(|(i, _)| i);
            let Some(index) = next else {
                break;
            };
            let timer = self.timers.remove(index);
            (timer.callback)(self);
        }
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Number of clipboard writes started, settled or not.
    pub fn clipboard_writes(&self) -> usize {
        self.clipboard_writes
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.element(node).disabled
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).classes.contains(class)
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.iter().filter(|r| r.node == node).count()
    }

    fn element(&self, node: NodeId) -> &Element {
        &self.elements[node.0]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.elements[node.0]
    }
}

impl Dom for MemoryDom {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        if let Some(id) = selector.strip_prefix('#') {
            return self.element_by_id(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return self
                .elements
                .iter()
                .position(|e| e.classes.contains(class))
                .map(NodeId);
        }
        let tag = selector.to_ascii_lowercase();
        self.elements.iter().position(|e| e.tag == tag).map(NodeId)
    }

    fn control_kind(&self, node: NodeId) -> ControlKind {
        self.element(node).kind.unwrap_or(ControlKind::Other)
    }

    fn value(&self, node: NodeId) -> String {
        let element = self.element(node);
        match element.kind {
            // Browsers expose a fake path for the first file.
            Some(ControlKind::File) => element
                .files
                .first()
                .map(|f| format!("C:\\fakepath\\{}", f.name))
                .unwrap_or_default(),
            _ => element.value.clone(),
        }
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        let element = self.element_mut(node);
        if element.kind == Some(ControlKind::File) {
            if value.is_empty() {
                element.files.clear();
            }
            return;
        }
        element.value = value.to_string();
    }

    fn files(&self, node: NodeId) -> Vec<FileMeta> {
        self.element(node).files.clone()
    }

    fn assign_dropped_files(&mut self, input: NodeId, event: &Event) {
        self.element_mut(input).files = event.files.clone();
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node).text.clone()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.element_mut(node).text = text.to_string();
    }

    fn is_displayed(&self, node: NodeId) -> bool {
        self.element(node).displayed
    }

    fn set_displayed(&mut self, node: NodeId, displayed: bool) {
        self.element_mut(node).displayed = displayed;
    }

    fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        let classes = &mut self.element_mut(node).classes;
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        self.element_mut(node).disabled = disabled;
    }

    fn add_listener(&mut self, node: NodeId, kind: EventKind, phase: Phase, listener: Listener) {
        self.listeners.push(Registration {
            node,
            kind,
            phase,
            listener,
        });
    }

    fn table_rows(&self, table: NodeId) -> Vec<Vec<String>> {
        self.element(table).rows.clone()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn write_clipboard(&mut self, text: String, done: ClipboardCallback) {
        self.clipboard_writes += 1;
        self.pending_clipboard.push_back((text, done));
    }

    fn set_timeout(&mut self, delay_ms: u32, callback: TimerCallback) {
        self.timer_seq += 1;
        self.timers.push(Timer {
            due_ms: self.now_ms + u64::from(delay_ms),
            seq: self.timer_seq,
            callback,
        });
    }
}
