//! Axum application setup.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Session views
        .route("/session", get(handlers::get_session))
        .route("/rows", get(handlers::get_rows))
        .route("/clipboard", get(handlers::get_clipboard))
        // Report upload
        .route("/report", post(handlers::upload_report))
        // Negative keyword edits
        .route("/negatives/phrase", post(handlers::add_phrase))
        .route("/negatives/phrase/remove", post(handlers::remove_phrase))
        .route("/negatives/word", post(handlers::toggle_word))
        .route("/negatives/:id/remove", post(handlers::remove_negative))
        .route("/negatives/:id/match-type", post(handlers::update_match_type));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    info!(%addr, "Review server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use termsift::Session;
    use tower::ServiceExt;

    const REPORT: &[u8] = b"Search term,Clicks\ncheap red shoes,4\nfree shoes,1\n";

    fn loaded_state() -> AppState {
        let mut session = Session::new();
        session.ingest_upload("terms.csv", REPORT).unwrap();
        AppState::new(session)
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn post_json(state: &AppState, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, bytes) = send(state, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(state: &AppState, uri: &str) -> Value {
        let (status, bytes) = send(state, Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_session() {
        let state = AppState::default();
        let snapshot = get_json(&state, "/api/session").await;

        assert_eq!(snapshot["summary"]["row_count"], 0);
        assert_eq!(snapshot["summary"]["phrase_column"], "Search term");
        assert_eq!(snapshot["negatives"], json!([]));
    }

    #[tokio::test]
    async fn test_upload_report() {
        let state = AppState::default();
        let request = Request::post("/api/report?name=terms.csv")
            .body(Body::from(REPORT))
            .unwrap();
        let (status, bytes) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);

        let snapshot: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(snapshot["summary"]["file"], "terms.csv");
        assert_eq!(snapshot["summary"]["row_count"], 2);

        let rows = get_json(&state, "/api/rows").await;
        assert_eq!(rows[0]["phrase"], "cheap red shoes");
        assert_eq!(rows[0]["tokens"][0]["text"], "cheap");
    }

    #[tokio::test]
    async fn test_bad_upload_keeps_session() {
        let state = loaded_state();
        let request = Request::post("/api/report?name=bad.csv")
            .body(Body::from(vec![0xff, 0xfe, 0x00]))
            .unwrap();
        let (status, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let snapshot = get_json(&state, "/api/session").await;
        assert_eq!(snapshot["summary"]["file"], "terms.csv");
        assert_eq!(snapshot["summary"]["row_count"], 2);
    }

    #[tokio::test]
    async fn test_phrase_and_word_flow() {
        let state = loaded_state();

        let (status, snapshot) = post_json(
            &state,
            "/api/negatives/phrase",
            json!({"text": "free shoes", "row_id": 2}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["formatted_lines"], json!(["[free shoes]"]));
        assert_eq!(snapshot["marked_rows"], json!([2]));

        let (_, snapshot) =
            post_json(&state, "/api/negatives/word", json!({"text": "cheap"})).await;
        assert_eq!(snapshot["formatted_lines"], json!(["[free shoes]", "cheap"]));

        let rows = get_json(&state, "/api/rows").await;
        assert_eq!(rows[0]["tokens"][0]["in_list"], true);
        assert_eq!(rows[1]["marked"], true);

        let (_, snapshot) = post_json(
            &state,
            "/api/negatives/phrase/remove",
            json!({"text": "free shoes", "row_id": 2}),
        )
        .await;
        assert_eq!(snapshot["formatted_lines"], json!(["cheap"]));
        assert_eq!(snapshot["marked_rows"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_targets_leave_session_unchanged() {
        let state = loaded_state();
        let (_, before) = post_json(&state, "/api/negatives/word", json!({"text": "cheap"})).await;

        let (status, after) = post_json(
            &state,
            "/api/negatives/phrase/remove",
            json!({"text": "ghost", "row_id": 42}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(after, before);

        let (status, after) = post_json(&state, "/api/negatives/neg_999/remove", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(after, before);

        let (status, after) = post_json(
            &state,
            "/api/negatives/neg_999/match-type",
            json!({"match_type": "exact"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_match_type_and_remove_by_id() {
        let state = loaded_state();
        let (_, snapshot) =
            post_json(&state, "/api/negatives/word", json!({"text": "shoes"})).await;
        let id = snapshot["negatives"][0]["id"].as_str().unwrap().to_string();

        let (status, snapshot) = post_json(
            &state,
            &format!("/api/negatives/{}/match-type", id),
            json!({"match_type": "Phrase"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["formatted_lines"], json!(["\"shoes\""]));

        let (status, body) = post_json(
            &state,
            &format!("/api/negatives/{}/match-type", id),
            json!({"match_type": "fuzzy"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");

        let (status, snapshot) = post_json(
            &state,
            &format!("/api/negatives/{}/remove", id),
            json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["negatives"], json!([]));

        // A repeated click on the same remove button is harmless.
        let (status, again) = post_json(
            &state,
            &format!("/api/negatives/{}/remove", id),
            json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(again, snapshot);
    }

    #[tokio::test]
    async fn test_clipboard_is_plain_text() {
        let state = loaded_state();
        post_json(&state, "/api/negatives/word", json!({"text": "cheap"})).await;
        post_json(
            &state,
            "/api/negatives/phrase",
            json!({"text": "free shoes", "row_id": 2}),
        )
        .await;

        let response = create_router(state.clone())
            .oneshot(Request::get("/api/clipboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"cheap\n[free shoes]");
    }
}
