use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::page::render_index;
use crate::state::AppState;

/// GET /
/// Upload form with the widget bundle mounted over it.
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = render_index(
        &state.page,
        &state.config.customers,
        &state.config.upload_action,
    )?;
    Ok(Html(html))
}
