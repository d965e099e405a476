use std::rc::Rc;

use tracing::{debug, error, info};

use crate::config::CopyConfig;
use crate::dom::{resolve, Dom, Event, EventKind, NodeId, Phase};
use crate::errors::CopyError;

pub const COPIED_LABEL: &str = "Copied!";
pub const COPIED_CLASS: &str = "copied";

/// Tab-separated cells, one line per row. Rows without cells are skipped;
/// `None` when nothing is left.
pub fn rows_to_tsv(rows: &[Vec<String>]) -> Option<String> {
    let lines: Vec<String> = rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| row.join("\t"))
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Copies the results table to the clipboard when its button is clicked.
pub struct CopyTableAction {
    button: NodeId,
}

impl CopyTableAction {
    /// Inert without the button. The table is looked up on every click since
    /// it only exists once results have been rendered.
    pub fn bind(dom: &mut dyn Dom, config: &CopyConfig) -> Option<Self> {
        let Some(button) = resolve(dom, &config.button) else {
            debug!(button = %config.button, "copy button not found");
            return None;
        };
        let label = dom.text(button);
        let table = config.table.clone();
        let feedback_ms = config.feedback_ms;
        dom.add_listener(
            button,
            EventKind::Click,
            Phase::Bubble,
            Rc::new(move |dom: &mut dyn Dom, _: &mut Event| {
                if let Err(err) = copy_table(dom, &table, button, &label, feedback_ms) {
                    error!(%err, "copy failed");
                    dom.alert(&err.to_string());
                }
            }),
        );
        Some(Self { button })
    }

    pub fn button(&self) -> NodeId {
        self.button
    }
}

/// Starts the clipboard write. Errors found before the write are returned;
/// a rejected write is alerted from its completion callback.
pub fn copy_table(
    dom: &mut dyn Dom,
    table_selector: &str,
    button: NodeId,
    label: &str,
    feedback_ms: u32,
) -> Result<(), CopyError> {
    let table = resolve(dom, table_selector).ok_or(CopyError::TableMissing)?;
    let text = rows_to_tsv(&dom.table_rows(table)).ok_or(CopyError::NoData)?;
    let label = label.to_string();

    dom.write_clipboard(
        text,
        Box::new(move |dom: &mut dyn Dom, outcome: Result<(), String>| match outcome {
            Ok(()) => {
                info!("results copied to clipboard");
                dom.set_text(button, COPIED_LABEL);
                dom.toggle_class(button, COPIED_CLASS, true);
                dom.set_timeout(
                    feedback_ms,
                    Box::new(move |dom: &mut dyn Dom| {
                        dom.set_text(button, &label);
                        dom.toggle_class(button, COPIED_CLASS, false);
                    }),
                );
            }
            Err(reason) => {
                let err = CopyError::Clipboard(reason);
                error!(%err, "clipboard write rejected");
                dom.alert(&err.to_string());
            }
        }),
    );
    Ok(())
}
