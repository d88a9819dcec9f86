pub mod ui;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

use crate::analysis;
use crate::config::AppConfig;
use crate::document::TextSplitter;
use crate::providers::gemini::GeminiProvider;
use crate::providers::traits::CompletionProvider;
use crate::retrieval::RetrievalChain;
use crate::social::PostComposer;

#[derive(Clone)]
pub struct AppState {
    provider: Arc<Box<dyn CompletionProvider + Send + Sync>>,
    config: AppConfig,
    session: Arc<RwLock<Option<RetrievalChain>>>,
}

#[derive(Deserialize, Validate)]
pub struct DocumentRequest {
    #[validate(length(min = 1, max = 500000))]
    text: String,
    #[serde(default = "default_mode")]
    mode: String,
}

fn default_mode() -> String {
    "quick".to_string()
}

#[derive(Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, max = 1000))]
    question: String,
}

#[derive(Deserialize, Validate)]
pub struct PostsRequest {
    #[validate(length(min = 1, max = 200))]
    topic: String,
    #[serde(default = "default_count")]
    count: usize,
}

fn default_count() -> usize {
    3
}

#[derive(Serialize)]
pub struct DocumentResponse {
    status: String,
    mode: String,
    chunks: usize,
}

#[derive(Serialize)]
pub struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
pub struct PostsResponse {
    posts: Vec<String>,
}

#[derive(Serialize)]
struct ApiResponse {
    status: String,
}

/// Create and configure the API router.
pub fn create_api(config: AppConfig) -> Router {
    let provider = GeminiProvider::from_config(&config);

    let state = AppState {
        provider: Arc::new(Box::new(provider)),
        config,
        session: Arc::new(RwLock::new(None)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health_check))
        .route("/document", post(document_handler))
        .route("/ask", post(ask_handler))
        .route("/posts", post(posts_handler))
        .layer(cors)
        .with_state(state)
}

async fn index_page() -> Html<&'static str> {
    Html(ui::INDEX_HTML)
}

async fn health_check() -> Response {
    Json(ApiResponse {
        status: "Server is running".to_string(),
    })
    .into_response()
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiResponse { status: message })).into_response()
}

fn pipeline_error(e: impl std::fmt::Display) -> Response {
    // One coarse failure path per handler: log the cause, return a single
    // status message, produce no result.
    log::error!("Request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse {
            status: format!("Request failed: {}", e),
        }),
    )
        .into_response()
}

async fn document_handler(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Response {
    if let Err(e) = request.validate() {
        return bad_request(format!("Invalid request: {}", e));
    }

    let (mode, config) = match analysis::lookup(&request.mode) {
        Ok(found) => found,
        Err(e) => return bad_request(e.to_string()),
    };

    let chunks = TextSplitter::for_config(config).split(&request.text);
    if chunks.is_empty() {
        return bad_request("Document contains no text".to_string());
    }
    let chunk_count = chunks.len();

    let chain = match RetrievalChain::build(
        state.provider.as_ref().clone_box(),
        &state.config.qdrant_url,
        chunks,
        mode,
        None,
    )
    .await
    {
        Ok(chain) => chain,
        Err(e) => return pipeline_error(e),
    };

    // Swap the new chain in first; a failed build above leaves the previous
    // session fully usable. Only then drop the old document's collection.
    let old = state.session.write().await.replace(chain);
    if let Some(old) = old {
        old.teardown().await;
    }

    Json(DocumentResponse {
        status: "Document processed".to_string(),
        mode: mode.to_string(),
        chunks: chunk_count,
    })
    .into_response()
}

async fn ask_handler(State(state): State<AppState>, Json(request): Json<AskRequest>) -> Response {
    if let Err(e) = request.validate() {
        return bad_request(format!("Invalid request: {}", e));
    }

    let mut session = state.session.write().await;
    let chain = match session.as_mut() {
        Some(chain) => chain,
        None => return bad_request("No document loaded. POST /document first.".to_string()),
    };

    match chain.ask(&request.question).await {
        Ok(answer) => Json(AskResponse { answer }).into_response(),
        Err(e) => pipeline_error(e),
    }
}

async fn posts_handler(
    State(state): State<AppState>,
    Json(request): Json<PostsRequest>,
) -> Response {
    if let Err(e) = request.validate() {
        return bad_request(format!("Invalid request: {}", e));
    }
    if request.count == 0 || request.count > 10 {
        return bad_request("Post count must be between 1 and 10".to_string());
    }

    match PostComposer::generate(state.provider.as_ref().as_ref(), &request.topic, request.count)
        .await
    {
        Ok(posts) => Json(PostsResponse { posts }).into_response(),
        Err(e) => pipeline_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_config() -> AppConfig {
        AppConfig {
            api_key: "test-key".to_string(),
            model: "gemini-pro".to_string(),
            embed_model: "embedding-001".to_string(),
            // Nothing listens here, so indexing fails fast.
            qdrant_url: "http://127.0.0.1:9".to_string(),
        }
    }

    async fn post_json(app: &Router, path: &str, body: &str) -> StatusCode {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn ask_without_document_is_a_client_error() {
        let app = create_api(test_config());
        let status = post_json(&app, "/ask", r#"{"question":"what is clause 4?"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_mode_is_rejected_before_any_indexing() {
        let app = create_api(test_config());
        let status =
            post_json(&app, "/document", r#"{"text":"line one","mode":"exhaustive"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_document_build_leaves_session_empty() {
        let app = create_api(test_config());

        // The index service is unreachable, so the build fails after
        // validation succeeds.
        let status = post_json(
            &app,
            "/document",
            r#"{"text":"line one\nline two","mode":"quick"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        // The failure must not leave a half-built session behind: asking
        // still reports that no document is loaded.
        let status = post_json(&app, "/ask", r#"{"question":"anything"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
