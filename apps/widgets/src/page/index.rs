use std::rc::Rc;

use tracing::{debug, info};

use crate::config::PageConfig;
use crate::dom::{resolve, Dom, Event, EventKind, FileMeta, NodeId, Phase};
use crate::forms::FormLoadingManager;
use crate::page::copy::CopyTableAction;
use crate::upload::{FileUploadHandler, SelectionHook};

/// Submit is enabled only with an accepted file and a chosen customer.
#[derive(Debug, Clone, Copy)]
pub struct SubmitGate {
    input: NodeId,
    customer: Option<NodeId>,
    submit: NodeId,
}

impl SubmitGate {
    pub fn is_open(&self, dom: &dyn Dom) -> bool {
        let has_file = !dom.files(self.input).is_empty();
        let has_customer = self
            .customer
            .is_some_and(|customer| !dom.value(customer).is_empty());
        has_file && has_customer
    }

    pub fn apply(&self, dom: &mut dyn Dom) -> bool {
        let open = self.is_open(dom);
        dom.set_disabled(self.submit, !open);
        open
    }
}

/// Widgets mounted on the upload page. Each part is `None` when its markup
/// is missing.
pub struct IndexPage {
    pub upload: Option<FileUploadHandler>,
    pub gate: Option<SubmitGate>,
    pub loading: Option<FormLoadingManager>,
    pub copy: Option<CopyTableAction>,
}

impl IndexPage {
    pub fn mount(dom: &mut dyn Dom, config: &PageConfig) -> Self {
        let gate = match (
            dom.element_by_id(&config.upload.input_id),
            config
                .upload
                .submit_button
                .as_deref()
                .and_then(|s| resolve(dom, s)),
        ) {
            (Some(input), Some(submit)) => Some(SubmitGate {
                input,
                customer: resolve(dom, &config.customer_select),
                submit,
            }),
            _ => None,
        };

        let hook: Option<SelectionHook> = gate.map(|gate| -> SelectionHook {
            Rc::new(move |dom: &mut dyn Dom, _: &FileMeta| {
                gate.apply(dom);
            })
        });
        let upload = FileUploadHandler::bind(dom, &config.upload, config.policy.clone(), hook);

        if let (Some(_), Some(gate)) = (&upload, gate) {
            if let Some(customer) = gate.customer {
                dom.add_listener(
                    customer,
                    EventKind::Change,
                    Phase::Bubble,
                    Rc::new(move |dom: &mut dyn Dom, _: &mut Event| {
                        gate.apply(dom);
                    }),
                );
            }
            gate.apply(dom);
        }

        let loading = FormLoadingManager::bind(dom, &config.loading);
        let copy = CopyTableAction::bind(dom, &config.copy);

        info!(
            upload = upload.is_some(),
            loading = loading.is_some(),
            copy = copy.is_some(),
            "index page mounted"
        );
        if gate.is_some_and(|g| g.customer.is_none()) {
            debug!(select = %config.customer_select, "customer select missing, submit stays closed");
        }

        Self {
            upload,
            gate,
            loading,
            copy,
        }
    }
}
