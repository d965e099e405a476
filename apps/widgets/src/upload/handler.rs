use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::{SubmitMode, UploadConfig};
use crate::dom::{resolve, Dom, Event, EventKind, FileMeta, NodeId, Phase};
use crate::upload::policy::{AcceptancePolicy, Rejection};

/// Class put on the drop area while a drag hovers over it.
pub const DRAG_ACTIVE_CLASS: &str = "dragover";

/// Runs after a file is accepted, for page-specific follow-up.
pub type SelectionHook = Rc<dyn Fn(&mut dyn Dom, &FileMeta)>;

/// Outcome of one run of the selection pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Accepted(FileMeta),
    Rejected(Rejection),
    Empty,
}

struct Binding {
    input: NodeId,
    drop_area: NodeId,
    file_info: Option<NodeId>,
    file_name: Option<NodeId>,
    submit: Option<NodeId>,
    submit_mode: SubmitMode,
    policy: AcceptancePolicy,
    on_selected: Option<SelectionHook>,
}

/// File input plus drop zone feeding one selection pipeline.
#[derive(Clone)]
pub struct FileUploadHandler {
    binding: Rc<Binding>,
}

impl FileUploadHandler {
    /// Binds to the configured elements. Returns `None`, attaching nothing,
    /// when the input or the drop area is missing.
    pub fn bind(
        dom: &mut dyn Dom,
        config: &UploadConfig,
        policy: AcceptancePolicy,
        on_selected: Option<SelectionHook>,
    ) -> Option<Self> {
        let Some(input) = dom.element_by_id(&config.input_id) else {
            debug!(input = %config.input_id, "upload input not found, handler inert");
            return None;
        };
        let Some(drop_area) = resolve(dom, &config.drop_area) else {
            debug!(drop_area = %config.drop_area, "drop area not found, handler inert");
            return None;
        };

        let binding = Rc::new(Binding {
            input,
            drop_area,
            file_info: resolve(dom, &config.file_info),
            file_name: config.file_name.as_deref().and_then(|s| resolve(dom, s)),
            submit: config.submit_button.as_deref().and_then(|s| resolve(dom, s)),
            submit_mode: config.submit_mode,
            policy,
            on_selected,
        });
        let handler = Self { binding };
        handler.attach(dom);
        debug!(input = %config.input_id, policy = ?handler.binding.policy, "upload handler bound");
        Some(handler)
    }

    fn attach(&self, dom: &mut dyn Dom) {
        let b = &self.binding;

        let on_change = self.clone();
        dom.add_listener(
            b.input,
            EventKind::Change,
            Phase::Bubble,
            Rc::new(move |dom: &mut dyn Dom, _: &mut Event| {
                on_change.process_selection(dom);
            }),
        );

        let drop_area = b.drop_area;
        dom.add_listener(
            drop_area,
            EventKind::DragOver,
            Phase::Bubble,
            Rc::new(move |dom: &mut dyn Dom, event: &mut Event| {
                event.prevent_default();
                dom.toggle_class(drop_area, DRAG_ACTIVE_CLASS, true);
            }),
        );
        dom.add_listener(
            drop_area,
            EventKind::DragLeave,
            Phase::Bubble,
            Rc::new(move |dom: &mut dyn Dom, _: &mut Event| {
                dom.toggle_class(drop_area, DRAG_ACTIVE_CLASS, false);
            }),
        );

        let on_drop = self.clone();
        dom.add_listener(
            drop_area,
            EventKind::Drop,
            Phase::Bubble,
            Rc::new(move |dom: &mut dyn Dom, event: &mut Event| {
                event.prevent_default();
                dom.toggle_class(drop_area, DRAG_ACTIVE_CLASS, false);
                dom.assign_dropped_files(on_drop.binding.input, event);
                on_drop.process_selection(dom);
            }),
        );
    }

    /// Reads the input's first file and either shows it or resets. Running it
    /// again on the same file leaves the page unchanged.
    pub fn process_selection(&self, dom: &mut dyn Dom) -> Selection {
        let b = &self.binding;
        let Some(file) = dom.files(b.input).into_iter().next() else {
            self.reset(dom);
            return Selection::Empty;
        };

        if let Err(rejection) = b.policy.check(&file) {
            warn!(file = %file.name, size = file.size, %rejection, "file rejected");
            dom.alert(&rejection.to_string());
            self.reset(dom);
            return Selection::Rejected(rejection);
        }

        info!(file = %file.name, size = file.size, "file selected");
        if let Some(target) = b.file_name.or(b.file_info) {
            dom.set_text(target, &file.name);
        }
        if let Some(info) = b.file_info {
            dom.set_displayed(info, true);
        }
        if let (SubmitMode::Auto, Some(submit)) = (b.submit_mode, b.submit) {
            dom.set_disabled(submit, false);
        }
        if let Some(hook) = &b.on_selected {
            hook(dom, &file);
        }
        Selection::Accepted(file)
    }

    /// Hides the file info, clears the input and disables the submit button.
    pub fn reset(&self, dom: &mut dyn Dom) {
        let b = &self.binding;
        if let Some(info) = b.file_info {
            dom.set_displayed(info, false);
        }
        dom.set_value(b.input, "");
        if let Some(submit) = b.submit {
            dom.set_disabled(submit, true);
        }
    }

    pub fn input(&self) -> NodeId {
        self.binding.input
    }

    pub fn submit_button(&self) -> Option<NodeId> {
        self.binding.submit
    }

    pub fn policy(&self) -> &AcceptancePolicy {
        &self.binding.policy
    }
}
