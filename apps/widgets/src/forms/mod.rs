//! Form-level widgets: submission loading state and required-field gating.

mod loading;
mod validator;

pub use loading::{FormLoadingManager, LoadingState};
pub use validator::{field_is_valid, MultiFieldValidator};
