//! Page-level composition of the widgets.

mod copy;
mod index;

pub use copy::{copy_table, rows_to_tsv, CopyTableAction, COPIED_CLASS, COPIED_LABEL};
pub use index::{IndexPage, SubmitGate};
