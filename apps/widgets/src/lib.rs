//! Browser widgets for the purchase-order upload page: drag-and-drop file
//! selection with acceptance policies, submission loading state,
//! required-field gating and copying the results table.
//!
//! Every widget runs against the [`dom::Dom`] seam, so the same code drives
//! the page in the browser (feature `web`) and the in-memory document used by
//! the tests.

pub mod config;
pub mod dom;
pub mod errors;
pub mod forms;
pub mod logging;
pub mod page;
pub mod upload;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod entry;

pub use config::{CopyConfig, LoadingConfig, PageConfig, SubmitMode, UploadConfig, ValidatorConfig};
pub use errors::{ConfigError, CopyError};
pub use forms::{FormLoadingManager, LoadingState, MultiFieldValidator};
pub use page::{CopyTableAction, IndexPage};
pub use upload::{format_size_limit, AcceptancePolicy, FileUploadHandler, Rejection, Selection};
