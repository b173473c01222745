use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{debug, info, warn};

use crate::AppState;
use crate::api::{self, ApiState};
use crate::assistant::{AnswerGenerator, LlmAnswerGenerator, RequestQuota};
use crate::backend::HttpBackend;
use crate::catalog::Catalog;
use crate::config::{AppConfig, ChatMode, ResilienceConfig};
use crate::dashboard::{self, ChatStrategy, DEFAULT_SESSION_TIMEOUT, PageController, SessionStore};
use crate::llm::ChatCompletionsClient;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Assemble the full router: dashboard, static assets and, when given, the
/// embedded catalogue API under `/api`.
pub fn build_router(
    state: Arc<AppState>,
    api_state: Option<ApiState>,
    resilience: &ResilienceConfig,
) -> Router {
    let mut app = dashboard::router()
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    if let Some(api_state) = api_state {
        app = app.nest("/api", api::router(api_state));
    }

    // A disabled timeout becomes a very long one so the layer stack keeps one type.
    let timeout_duration = if resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60)
    } else {
        Duration::from_secs(resilience.request_timeout_secs)
    };

    app.layer(axum::middleware::from_fn(
        move |req: Request, next: Next| async move {
            match tokio::time::timeout(timeout_duration, next.run(req)).await {
                Ok(res) => res,
                Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
            }
        },
    ))
    .layer(TraceLayer::new_for_http())
}

/// Answer generator configured from `config.llm` and `config.quota`.
#[must_use]
pub fn build_assistant(config: &AppConfig) -> Arc<dyn AnswerGenerator> {
    let settings = config.llm_settings();
    info!(
        name: "llm.config.loaded",
        base_url = %settings.base_url,
        model = %settings.model,
        credential = settings.api_key.is_some(),
        "LLM configuration loaded"
    );

    let quota = match (
        NonZeroU32::new(config.quota.requests_per_minute),
        NonZeroU32::new(config.quota.requests_per_day),
    ) {
        (Some(per_minute), Some(per_day)) => Some(Arc::new(RequestQuota::new(per_minute, per_day))),
        _ => {
            warn!("Request quota disabled");
            None
        }
    };

    Arc::new(LlmAnswerGenerator::new(
        ChatCompletionsClient::new(settings),
        quota,
    ))
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let assistant = build_assistant(&config);

    let api_state = if config.catalog.enabled {
        let catalog = Catalog::load(&config.catalog).await;
        Some(ApiState {
            catalog: Arc::new(catalog),
            assistant: Arc::clone(&assistant),
        })
    } else {
        info!("Embedded catalogue disabled");
        None
    };

    let backend = HttpBackend::new(&config.backend.base_url)?;
    info!(name: "backend.configured", base_url = %backend.base_url(), "Publication backend configured");

    let chat = match config.chat.mode {
        ChatMode::Backend => ChatStrategy::Backend {
            key_url: config.llm_settings().provider.key_url(),
        },
        ChatMode::Direct => ChatStrategy::Direct(Arc::clone(&assistant)),
    };

    let sessions = SessionStore::new();
    spawn_session_sweeper(sessions.clone());

    let state = Arc::new(AppState {
        sessions,
        controller: PageController::new(Arc::new(backend), chat, config.chat.result_limit),
    });

    let app = build_router(state, api_state, &config.resilience);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

fn spawn_session_sweeper(sessions: SessionStore) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sessions.cleanup_expired_with_timeout(DEFAULT_SESSION_TIMEOUT);
            if removed > 0 {
                debug!(removed, remaining = sessions.len(), "Expired dashboard sessions removed");
            }
        }
    });
}
