use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dom::FileMeta;

/// 16 MiB, the ceiling the extraction backend accepts for a single PDF.
pub const DEFAULT_PDF_MAX_BYTES: u64 = 16 * 1024 * 1024;

const EXCEL_EXTENSIONS: &[&str] = &["xls", "xlsx"];

const MIB: u128 = 1024 * 1024;

/// Size ceiling as shown to the user, rounded down to hundredths of a MiB so
/// the stated limit never exceeds the real one. Limits under 0.01 MB are
/// given in bytes.
pub fn format_size_limit(bytes: u64) -> String {
    let hundredths = u128::from(bytes) * 100 / MIB;
    let (whole, frac) = (hundredths / 100, hundredths % 100);
    match frac {
        _ if hundredths == 0 => format!("{bytes} bytes"),
        0 => format!("{whole} MB"),
        f if f % 10 == 0 => format!("{whole}.{} MB", f / 10),
        f => format!("{whole}.{f:02} MB"),
    }
}

/// Rule deciding whether a selected file is usable, injected into a
/// [`FileUploadHandler`](super::FileUploadHandler) at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AcceptancePolicy {
    #[default]
    Any,
    Pdf {
        #[serde(default = "default_pdf_max_bytes")]
        max_bytes: u64,
    },
    Excel,
}

fn default_pdf_max_bytes() -> u64 {
    DEFAULT_PDF_MAX_BYTES
}

/// Why a file was turned away. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Please select a PDF file (.pdf).")]
    NotPdf,

    #[error("File is too large. Maximum size is {}.", format_size_limit(*.limit))]
    TooLarge { size: u64, limit: u64 },

    #[error("Please select an Excel file (.xls or .xlsx).")]
    NotExcel,
}

impl AcceptancePolicy {
    pub fn pdf() -> Self {
        AcceptancePolicy::Pdf {
            max_bytes: DEFAULT_PDF_MAX_BYTES,
        }
    }

    /// Checks run in order and stop at the first failure.
    pub fn check(&self, file: &FileMeta) -> Result<(), Rejection> {
        match self {
            AcceptancePolicy::Any => Ok(()),
            AcceptancePolicy::Pdf { max_bytes } => {
                if file.extension().as_deref() != Some("pdf") {
                    return Err(Rejection::NotPdf);
                }
                if file.size > *max_bytes {
                    return Err(Rejection::TooLarge {
                        size: file.size,
                        limit: *max_bytes,
                    });
                }
                Ok(())
            }
            AcceptancePolicy::Excel => match file.extension() {
                Some(ext) if EXCEL_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
                _ => Err(Rejection::NotExcel),
            },
        }
    }

    /// Value for the file input's `accept` attribute.
    pub fn accept_attribute(&self) -> &'static str {
        match self {
            AcceptancePolicy::Any => "",
            AcceptancePolicy::Pdf { .. } => ".pdf",
            AcceptancePolicy::Excel => ".xls,.xlsx",
        }
    }
}
