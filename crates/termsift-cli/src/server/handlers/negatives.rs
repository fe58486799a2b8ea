//! Handlers that edit the negative keyword list.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use termsift::{Action, MatchType, NegativeId, RowId, SessionSnapshot};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for adding or removing a row's whole phrase.
#[derive(Deserialize)]
pub struct PhraseRequest {
    pub text: String,
    pub row_id: RowId,
}

/// Request body for toggling a word.
#[derive(Deserialize)]
pub struct WordRequest {
    pub text: String,
}

/// Request body for changing a negative's match type.
#[derive(Deserialize)]
pub struct MatchTypeRequest {
    pub match_type: String,
}

/// POST /api/negatives/phrase
///
/// The edit endpoints never fail on unknown rows or ids; the session is
/// returned unchanged instead.
pub async fn add_phrase(
    State(state): State<AppState>,
    Json(req): Json<PhraseRequest>,
) -> Json<SessionSnapshot> {
    let mut session = state.session.write().await;

    session.dispatch(Action::AddFullPhrase {
        text: req.text,
        row_id: req.row_id,
    });

    Json(session.snapshot())
}

/// POST /api/negatives/phrase/remove
pub async fn remove_phrase(
    State(state): State<AppState>,
    Json(req): Json<PhraseRequest>,
) -> Json<SessionSnapshot> {
    let mut session = state.session.write().await;

    session.dispatch(Action::RemoveFullPhrase {
        text: req.text,
        row_id: req.row_id,
    });

    Json(session.snapshot())
}

/// POST /api/negatives/word
pub async fn toggle_word(
    State(state): State<AppState>,
    Json(req): Json<WordRequest>,
) -> Json<SessionSnapshot> {
    let mut session = state.session.write().await;
    session.dispatch(Action::ToggleWord { text: req.text });
    Json(session.snapshot())
}

/// POST /api/negatives/:id/remove
pub async fn remove_negative(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<SessionSnapshot> {
    let id = NegativeId::from(id);
    let mut session = state.session.write().await;

    session.dispatch(Action::RemoveById { id });

    Json(session.snapshot())
}

/// POST /api/negatives/:id/match-type
pub async fn update_match_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MatchTypeRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let match_type: MatchType = req.match_type.parse()?;
    let id = NegativeId::from(id);
    let mut session = state.session.write().await;

    session.dispatch(Action::UpdateMatchType { id, match_type });

    Ok(Json(session.snapshot()))
}
