//! Selector configuration for the widgets.
//!
//! Element ids and selectors are the only configuration surface. Defaults
//! match the markup served by the intake host.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::upload::AcceptancePolicy;

/// Who enables the upload form's submit button after an accepted selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitMode {
    /// The handler only disables; the post-selection hook decides enablement.
    #[default]
    Hook,
    /// The handler enables the button itself on acceptance.
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Element id of the file input, without `#`.
    pub input_id: String,
    pub drop_area: String,
    pub file_info: String,
    /// Element receiving the file name; the file-info element when unset.
    pub file_name: Option<String>,
    pub submit_button: Option<String>,
    pub submit_mode: SubmitMode,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            input_id: "pdfFile".to_string(),
            drop_area: "#dropArea".to_string(),
            file_info: "#fileInfo".to_string(),
            file_name: Some("#fileName".to_string()),
            submit_button: Some("#submitBtn".to_string()),
            submit_mode: SubmitMode::Hook,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    pub form: String,
    pub loading: String,
    pub results: Option<String>,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            form: "#uploadForm".to_string(),
            loading: "#loading".to_string(),
            results: Some("#results".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub form: String,
    pub fields: Vec<String>,
    pub submit_button: String,
}

impl ValidatorConfig {
    pub fn new<S: Into<String>>(
        form: impl Into<String>,
        fields: impl IntoIterator<Item = S>,
        submit_button: impl Into<String>,
    ) -> Self {
        Self {
            form: form.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            submit_button: submit_button.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    pub table: String,
    pub button: String,
    /// How long the "Copied!" label stays before the original returns.
    pub feedback_ms: u32,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            table: "#resultsTable".to_string(),
            button: "#copyBtn".to_string(),
            feedback_ms: 2000,
        }
    }
}

/// Everything the index page mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub upload: UploadConfig,
    pub policy: AcceptancePolicy,
    pub customer_select: String,
    pub loading: LoadingConfig,
    pub copy: CopyConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            upload: UploadConfig::default(),
            policy: AcceptancePolicy::pdf(),
            customer_select: "#customerSelect".to_string(),
            loading: LoadingConfig::default(),
            copy: CopyConfig::default(),
        }
    }
}

impl PageConfig {
    /// Parses a JSON document; missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: PageConfig = serde_json::from_str(raw)?;
        if config.upload.input_id.trim().is_empty() {
            return Err(ConfigError::Invalid("upload.input_id is empty".to_string()));
        }
        if let AcceptancePolicy::Pdf { max_bytes: 0 } = config.policy {
            return Err(ConfigError::Invalid("policy.max_bytes must be positive".to_string()));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}
