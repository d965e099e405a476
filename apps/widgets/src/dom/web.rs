//! `web-sys` implementation of the document seam.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, DragEvent, Element, FileList, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, Window,
};

use super::{
    ClipboardCallback, ControlKind, Dom, Event, EventKind, FileMeta, Listener, NodeId, Phase,
    TimerCallback,
};

struct Inner {
    window: Window,
    document: Document,
    /// Elements handed out as `NodeId`s, by index.
    nodes: RefCell<Vec<Element>>,
    /// File list of the drop currently being dispatched.
    dropped: RefCell<Option<FileList>>,
}

/// Cheap handle over the page's document; clones share element handles.
#[derive(Clone)]
pub struct WebDom {
    inner: Rc<Inner>,
}

impl WebDom {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            inner: Rc::new(Inner {
                window,
                document,
                nodes: RefCell::default(),
                dropped: RefCell::default(),
            }),
        })
    }

    fn intern(&self, element: Element) -> NodeId {
        let mut nodes = self.inner.nodes.borrow_mut();
        if let Some(index) = nodes.iter().position(|known| *known == element) {
            return NodeId(index);
        }
        nodes.push(element);
        NodeId(nodes.len() - 1)
    }

    fn element(&self, node: NodeId) -> Element {
        self.inner.nodes.borrow()[node.0].clone()
    }
}

fn file_metas(list: &FileList) -> Vec<FileMeta> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| FileMeta::new(file.name(), file.size() as u64))
        .collect()
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

impl Dom for WebDom {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.inner
            .document
            .get_element_by_id(id)
            .map(|e| self.intern(e))
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.inner
            .document
            .query_selector(selector)
            .ok()
            .flatten()
            .map(|e| self.intern(e))
    }

    fn control_kind(&self, node: NodeId) -> ControlKind {
        let element = self.element(node);
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            if input.type_().eq_ignore_ascii_case("file") {
                return ControlKind::File;
            }
            return ControlKind::Text;
        }
        if element.is_instance_of::<HtmlSelectElement>() {
            return ControlKind::Select;
        }
        if element.is_instance_of::<HtmlTextAreaElement>() {
            return ControlKind::Text;
        }
        ControlKind::Other
    }

    fn value(&self, node: NodeId) -> String {
        let element = self.element(node);
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            element.get_attribute("value").unwrap_or_default()
        }
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        let element = self.element(node);
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            let _ = element.set_attribute("value", value);
        }
    }

    fn files(&self, node: NodeId) -> Vec<FileMeta> {
        self.element(node)
            .dyn_ref::<HtmlInputElement>()
            .and_then(HtmlInputElement::files)
            .map(|list| file_metas(&list))
            .unwrap_or_default()
    }

    fn assign_dropped_files(&mut self, input: NodeId, _event: &Event) {
        let Some(list) = self.inner.dropped.borrow_mut().take() else {
            return;
        };
        if let Some(input) = self.element(input).dyn_ref::<HtmlInputElement>() {
            input.set_files(Some(&list));
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node).text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.element(node).set_text_content(Some(text));
    }

    fn is_displayed(&self, node: NodeId) -> bool {
        self.element(node)
            .dyn_ref::<HtmlElement>()
            .and_then(|el| el.style().get_property_value("display").ok())
            .map_or(true, |display| display != "none")
    }

    fn set_displayed(&mut self, node: NodeId, displayed: bool) {
        if let Some(el) = self.element(node).dyn_ref::<HtmlElement>() {
            let display = if displayed { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        let _ = self.element(node).class_list().toggle_with_force(class, on);
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        let element = self.element(node);
        let _ = if disabled {
            element.set_attribute("disabled", "")
        } else {
            element.remove_attribute("disabled")
        };
    }

    fn add_listener(&mut self, node: NodeId, kind: EventKind, phase: Phase, listener: Listener) {
        let element = self.element(node);
        let host = self.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |raw: web_sys::Event| {
            let mut event = Event::new(kind);
            if kind == EventKind::Drop {
                if let Some(list) = raw
                    .dyn_ref::<DragEvent>()
                    .and_then(DragEvent::data_transfer)
                    .and_then(|dt| dt.files())
                {
                    event.files = file_metas(&list);
                    *host.inner.dropped.borrow_mut() = Some(list);
                }
            }
            let mut dom = host.clone();
            listener(&mut dom, &mut event);
            if event.is_default_prevented() {
                raw.prevent_default();
            }
        });
        let _ = element.add_event_listener_with_callback_and_bool(
            kind.as_str(),
            callback.as_ref().unchecked_ref(),
            phase == Phase::Capture,
        );
        // Listeners live as long as the page.
        callback.forget();
    }

    fn table_rows(&self, table: NodeId) -> Vec<Vec<String>> {
        let Ok(rows) = self.element(table).query_selector_all("tr") else {
            return Vec::new();
        };
        (0..rows.length())
            .filter_map(|i| rows.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|row| {
                let Ok(cells) = row.query_selector_all("th, td") else {
                    return Vec::new();
                };
                (0..cells.length())
                    .filter_map(|i| cells.item(i))
                    .map(|cell| cell.text_content().unwrap_or_default().trim().to_string())
                    .collect()
            })
            .collect()
    }

    fn alert(&mut self, message: &str) {
        let _ = self.inner.window.alert_with_message(message);
    }

    fn write_clipboard(&mut self, text: String, done: ClipboardCallback) {
        let promise = self.inner.window.navigator().clipboard().write_text(&text);
        let mut host = self.clone();
        spawn_local(async move {
            let outcome = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| describe(&err));
            done(&mut host, outcome);
        });
    }

    fn set_timeout(&mut self, delay_ms: u32, callback: TimerCallback) {
        let mut host = self.clone();
        let once = Closure::once_into_js(move || callback(&mut host));
        let _ = self
            .inner
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                once.unchecked_ref::<Function>(),
                i32::try_from(delay_ms).unwrap_or(i32::MAX),
            );
    }
}
