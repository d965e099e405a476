//! Drag-and-drop file upload with an injected acceptance policy.

mod handler;
mod policy;

pub use handler::{FileUploadHandler, Selection, SelectionHook, DRAG_ACTIVE_CLASS};
pub use policy::{format_size_limit, AcceptancePolicy, Rejection, DEFAULT_PDF_MAX_BYTES};
