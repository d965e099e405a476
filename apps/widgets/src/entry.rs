//! `wasm-bindgen` entry points called from the page's module script.

use wasm_bindgen::prelude::*;

use crate::config::{PageConfig, UploadConfig, ValidatorConfig};
use crate::dom::web::WebDom;
use crate::errors::ConfigError;
use crate::forms::MultiFieldValidator;
use crate::page::IndexPage;
use crate::upload::{AcceptancePolicy, FileUploadHandler};

fn to_js(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn document() -> Result<WebDom, JsValue> {
    console_error_panic_hook::set_once();
    crate::logging::init("info");
    WebDom::new().ok_or_else(|| JsValue::from_str("no browser document available"))
}

/// Mounts the upload page. `config_json` overrides the default selectors.
#[wasm_bindgen]
pub fn start_index_page(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(raw) => PageConfig::from_json(&raw).map_err(to_js)?,
        None => PageConfig::default(),
    };
    let mut dom = document()?;
    IndexPage::mount(&mut dom, &config);
    Ok(())
}

/// Mounts an Excel upload handler; submit gating is left to a validator.
/// Returns whether the handler bound.
#[wasm_bindgen]
pub fn mount_excel_upload(upload_json: Option<String>) -> Result<bool, JsValue> {
    let config = match upload_json {
        Some(raw) => serde_json::from_str::<UploadConfig>(&raw)
            .map_err(|e| to_js(ConfigError::from(e)))?,
        None => UploadConfig {
            input_id: "excelFile".to_string(),
            ..UploadConfig::default()
        },
    };
    let mut dom = document()?;
    Ok(FileUploadHandler::bind(&mut dom, &config, AcceptancePolicy::Excel, None).is_some())
}

/// Gates `submit` on every selector in `fields`. Returns whether it bound.
#[wasm_bindgen]
pub fn mount_validator(form: &str, fields: Box<[JsValue]>, submit: &str) -> Result<bool, JsValue> {
    let fields: Vec<String> = fields.iter().filter_map(JsValue::as_string).collect();
    let config = ValidatorConfig::new(form, fields, submit);
    let mut dom = document()?;
    Ok(MultiFieldValidator::bind(&mut dom, &config).is_some())
}
