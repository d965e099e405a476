use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::dom::{resolve, ControlKind, Dom, Event, EventKind, NodeId, Phase};

/// Kind-specific emptiness check for one required field. A field that could
/// not be resolved is never valid.
pub fn field_is_valid(dom: &dyn Dom, field: Option<NodeId>) -> bool {
    let Some(node) = field else {
        return false;
    };
    match dom.control_kind(node) {
        ControlKind::File => !dom.files(node).is_empty(),
        ControlKind::Select => !dom.value(node).is_empty(),
        ControlKind::Text | ControlKind::Other => !dom.value(node).trim().is_empty(),
    }
}

struct Fields {
    selectors: Vec<String>,
    nodes: Vec<Option<NodeId>>,
    submit: NodeId,
    valid: Cell<bool>,
}

/// Keeps a submit button disabled until every required field is filled in.
#[derive(Clone)]
pub struct MultiFieldValidator {
    fields: Rc<Fields>,
}

impl MultiFieldValidator {
    /// Inert when the form or the submit button is missing. Validates once
    /// immediately so the button starts in the right state.
    pub fn bind(dom: &mut dyn Dom, config: &ValidatorConfig) -> Option<Self> {
        let (Some(_form), Some(submit)) = (
            resolve(dom, &config.form),
            resolve(dom, &config.submit_button),
        ) else {
            debug!(form = %config.form, "validator inert");
            return None;
        };

        let nodes: Vec<Option<NodeId>> = config.fields.iter().map(|s| resolve(dom, s)).collect();
        let validator = Self {
            fields: Rc::new(Fields {
                selectors: config.fields.clone(),
                nodes,
                submit,
                valid: Cell::new(false),
            }),
        };

        for node in validator.fields.nodes.iter().flatten().copied() {
            for kind in [EventKind::Change, EventKind::Input] {
                let on_event = validator.clone();
                dom.add_listener(
                    node,
                    kind,
                    Phase::Bubble,
                    Rc::new(move |dom: &mut dyn Dom, _: &mut Event| {
                        on_event.validate(dom);
                    }),
                );
            }
        }

        validator.validate(dom);
        Some(validator)
    }

    /// Re-reads every field and updates the submit button.
    pub fn validate(&self, dom: &mut dyn Dom) -> bool {
        let f = &self.fields;
        let mut all_valid = true;
        for (selector, node) in f.selectors.iter().zip(&f.nodes) {
            let valid = field_is_valid(dom, *node);
            trace!(field = %selector, valid, "field checked");
            all_valid &= valid;
        }
        dom.set_disabled(f.submit, !all_valid);
        f.valid.set(all_valid);
        all_valid
    }

    /// Result of the most recent validation.
    pub fn is_valid(&self) -> bool {
        self.fields.valid.get()
    }
}
