use std::sync::Arc;

use intake_widgets::PageConfig;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Widget selectors and acceptance policy rendered into the index page.
    pub page: Arc<PageConfig>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let page = PageConfig {
            policy: intake_widgets::AcceptancePolicy::Pdf {
                max_bytes: config.max_upload_bytes,
            },
            ..PageConfig::default()
        };
        Self {
            config,
            page: Arc::new(page),
        }
    }
}
