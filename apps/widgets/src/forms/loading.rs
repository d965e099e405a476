use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::LoadingConfig;
use crate::dom::{resolve, Dom, Event, EventKind, NodeId, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    Idle,
    Loading,
}

/// Shows a loading indicator once the form is submitted. Nothing resets it;
/// the navigation that follows submission does.
pub struct FormLoadingManager {
    form: NodeId,
    state: Rc<Cell<LoadingState>>,
}

impl FormLoadingManager {
    pub fn bind(dom: &mut dyn Dom, config: &LoadingConfig) -> Option<Self> {
        let (Some(form), Some(loading)) = (resolve(dom, &config.form), resolve(dom, &config.loading))
        else {
            debug!(form = %config.form, "loading manager inert");
            return None;
        };
        let results = config.results.as_deref().and_then(|s| resolve(dom, s));

        let state = Rc::new(Cell::new(LoadingState::Idle));
        let on_submit = state.clone();
        // Capture phase, default left alone so the native submission proceeds.
        dom.add_listener(
            form,
            EventKind::Submit,
            Phase::Capture,
            Rc::new(move |dom: &mut dyn Dom, _: &mut Event| {
                dom.set_displayed(loading, true);
                if let Some(results) = results {
                    dom.set_displayed(results, false);
                }
                on_submit.set(LoadingState::Loading);
                info!("form submitted, showing loading indicator");
            }),
        );
        Some(Self { form, state })
    }

    pub fn state(&self) -> LoadingState {
        self.state.get()
    }

    pub fn form(&self) -> NodeId {
        self.form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDom;

    #[test]
    fn test_submit_shows_loading_and_hides_results() {
        let mut dom = MemoryDom::new();
        let form = dom.insert("form", &[("id", "uploadForm")]);
        let loading = dom.insert("div", &[("id", "loading"), ("style", "display:none")]);
        let results = dom.insert("div", &[("id", "results")]);
        let manager = FormLoadingManager::bind(&mut dom, &LoadingConfig::default()).unwrap();
        assert_eq!(manager.state(), LoadingState::Idle);

        let event = dom.submit(form);
        assert!(!event.is_default_prevented());
        assert!(dom.is_displayed(loading));
        assert!(!dom.is_displayed(results));
        assert_eq!(manager.state(), LoadingState::Loading);
    }

    #[test]
    fn test_results_container_is_optional() {
        let mut dom = MemoryDom::new();
        let form = dom.insert("form", &[("id", "uploadForm")]);
        let loading = dom.insert("div", &[("id", "loading"), ("style", "display:none")]);
        let manager = FormLoadingManager::bind(&mut dom, &LoadingConfig::default()).unwrap();
        dom.submit(form);
        assert!(dom.is_displayed(loading));
        assert_eq!(manager.form(), form);
    }

    #[test]
    fn test_missing_loading_indicator_is_inert() {
        let mut dom = MemoryDom::new();
        let form = dom.insert("form", &[("id", "uploadForm")]);
        assert!(FormLoadingManager::bind(&mut dom, &LoadingConfig::default()).is_none());
        assert_eq!(dom.listener_count(form), 0);
    }

    #[test]
    fn test_repeated_submit_stays_loading() {
        let mut dom = MemoryDom::new();
        let form = dom.insert("form", &[("id", "uploadForm")]);
        dom.insert("div", &[("id", "loading")]);
        let manager = FormLoadingManager::bind(&mut dom, &LoadingConfig::default()).unwrap();
        dom.submit(form);
        dom.submit(form);
        assert_eq!(manager.state(), LoadingState::Loading);
    }
}
