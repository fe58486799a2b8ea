//! Report upload.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::warn;

use termsift::SessionSnapshot;

use crate::server::error::ApiError;
use crate::server::state::AppState;

const DEFAULT_UPLOAD_NAME: &str = "upload.csv";

#[derive(Deserialize)]
pub struct ReportQuery {
    pub name: Option<String>,
}

/// POST /api/report?name=...
///
/// The body is the raw file. A report that fails to parse leaves the
/// current session as it was.
pub async fn upload_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    body: Bytes,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let name = query
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string());

    let mut session = state.session.write().await;
    if let Err(e) = session.ingest_upload(name.as_str(), &body) {
        warn!(file = %name, error = %e, "Rejected report upload");
        return Err(e.into());
    }

    Ok(Json(session.snapshot()))
}
