//! Embedded catalogue API, mounted under `/api`.
//!
//! Serves the same contract [`crate::backend::HttpBackend`] consumes, so the
//! dashboard can run against this process or a separately hosted backend.

mod error;

pub use error::ApiError;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::assistant::{AnswerGenerator, ChatError, no_studies_message};
use crate::backend::{ChatReply, ChatRequest, Publication, SummaryQuery, TopicCount};
use crate::catalog::{Catalog, DEFAULT_SEARCH_LIMIT};

/// Default number of studies retrieved for a chat question.
pub const DEFAULT_CHAT_LIMIT: usize = 10;

/// State shared by the `/api` handlers.
#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<Catalog>,
    pub assistant: Arc<dyn AnswerGenerator>,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("publications", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

/// Build the `/api` router with permissive CORS.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/topics", get(topics))
        .route("/summaries", get(summaries))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy",
        service: "BioCosmos Explorer API",
    })
}

async fn topics(State(state): State<ApiState>) -> Json<Vec<TopicCount>> {
    Json(state.catalog.topics())
}

async fn summaries(
    State(state): State<ApiState>,
    Query(params): Query<SummaryQuery>,
) -> Json<Vec<Publication>> {
    Json(state.catalog.search(
        params.query.as_deref(),
        params.topic.as_deref(),
        params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    ))
}

async fn chat(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Query is required".to_string()));
    }
    let limit = req.limit.unwrap_or(DEFAULT_CHAT_LIMIT);

    let results = state.catalog.search(Some(query), None, limit);
    info!(name: "api.chat", query = %query, studies = results.len(), "Chat query");
    if results.is_empty() {
        return Ok(Json(ChatReply {
            response: no_studies_message(query),
            results,
        }));
    }

    let key_url = state.assistant.key_url();
    let response = state
        .assistant
        .generate(query, &results)
        .await
        .map_err(|e| {
            warn!(error = %e, "Answer generation failed");
            match &e {
                crate::llm::LlmError::QuotaExceeded(message) => ApiError::RateLimited(message.clone()),
                other => ApiError::from(ChatError::from_llm(other, key_url)),
            }
        })?;

    Ok(Json(ChatReply { response, results }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    const CSV: &str = "Title,Link\n\
        Microgravity induces bone loss in mice,https://example.org/1\n\
        Arabidopsis root growth in space,https://example.org/2\n\
        Bone density after long-duration spaceflight,https://example.org/3\n";

    struct Scripted {
        calls: AtomicUsize,
        outcome: fn() -> Result<String, LlmError>,
    }

    #[async_trait::async_trait]
    impl AnswerGenerator for Scripted {
        async fn generate(&self, _q: &str, _s: &[Publication]) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }

        fn key_url(&self) -> &'static str {
            "https://platform.openai.com/api-keys"
        }
    }

    fn test_app(outcome: fn() -> Result<String, LlmError>) -> (Router, Arc<Scripted>) {
        let assistant = Arc::new(Scripted {
            calls: AtomicUsize::new(0),
            outcome,
        });
        let state = ApiState {
            catalog: Arc::new(Catalog::from_csv_reader(CSV.as_bytes()).unwrap()),
            assistant: assistant.clone(),
        };
        (router(state), assistant)
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::post("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_summaries_filters() {
        let (app, _) = test_app(|| Ok(String::new()));
        let resp = app
            .oneshot(
                Request::get("/summaries?query=bone&topic=Human%20Health&limit=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["Title"], "Microgravity induces bone loss in mice");
        assert_eq!(items[0]["Topic"], "Human Health");
    }

    #[tokio::test]
    async fn test_chat_without_matches_skips_model() {
        let (app, assistant) = test_app(|| Ok("unused".to_string()));
        let resp = app.oneshot(post_chat(r#"{"query":"zebrafish"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["response"], no_studies_message("zebrafish"));
        assert_eq!(json["results"].as_array().unwrap().len(), 0);
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chat_answers_with_results() {
        let (app, _) = test_app(|| Ok("Bone loss is documented.".to_string()));
        let resp = app
            .oneshot(post_chat(r#"{"query":"bone loss","limit":5}"#))
            .await
            .unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["response"], "Bone loss is documented.");
        assert_eq!(json["results"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_chat_error_statuses() {
        let (app, _) = test_app(|| Ok(String::new()));
        let resp = app.oneshot(post_chat(r#"{"query":"  "}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let (app, _) = test_app(|| Err(LlmError::QuotaExceeded("Rate limit exceeded: 15 requests per minute. Please wait a moment.".into())));
        let resp = app.oneshot(post_chat(r#"{"query":"bone"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("15 requests per minute"));

        let (app, _) = test_app(|| Err(LlmError::MissingApiKey));
        let resp = app.oneshot(post_chat(r#"{"query":"bone"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let (app, _) = test_app(|| {
            Err(LlmError::Status {
                status: 500,
                message: "upstream exploded".into(),
            })
        });
        let resp = app.oneshot(post_chat(r#"{"query":"bone"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
