//! Read-only views of the session.

use axum::{Json, extract::State};

use termsift::{RowView, SessionSnapshot};

use crate::server::state::AppState;

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.snapshot().await)
}

/// GET /api/rows
pub async fn get_rows(State(state): State<AppState>) -> Json<Vec<RowView>> {
    let session = state.session.read().await;
    Json(session.rows_view())
}

/// GET /api/clipboard
///
/// One formatted negative per line, served as plain text.
pub async fn get_clipboard(State(state): State<AppState>) -> String {
    let session = state.session.read().await;
    session.negatives().clipboard_text()
}
