use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::{
    cache::{ResultsCache, ResultsSnapshot},
    config::Config,
    metrics::VoteCounter,
    queue::{VoteEvent, VoteQueue, VoteRequest},
};


#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub queue: Arc<VoteQueue>,
    pub cache: Arc<ResultsCache>,
    pub votes_cast: Arc<dyn VoteCounter>,
}

#[derive(Debug)]
pub struct ApiError {
    code: &'static str,
    message: String,
    status: StatusCode,
    details: Map<String, Value>,
}

impl ApiError {
    fn new(code: &'static str, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status,
            details: Map::new(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new("invalid_request", StatusCode::BAD_REQUEST, message)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    details: Map<String, Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S>,
    <axum::Json<T> as FromRequest<S>>::Rejection: std::fmt::Display,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;
        Ok(Self(value))
    }
}

pub fn build_router(
    config: Config,
    queue: Arc<VoteQueue>,
    cache: Arc<ResultsCache>,
    votes_cast: Arc<dyn VoteCounter>,
) -> Router {
    let app_state = AppState {
        config: Arc::new(config),
        queue,
        cache,
        votes_cast,
    };

    Router::new()
        .route("/votes", get(get_votes).post(cast_vote))
        .route("/poll", get(get_poll))
        .route("/health", get(health))
        .layer(Extension(app_state))
}

/// Snapshot read of the result cache. Always succeeds, possibly with an
/// empty mapping before the first successful refresh.
async fn get_votes(Extension(state): Extension<AppState>) -> Json<ResultsSnapshot> {
    Json((*state.cache.read()).clone())
}

/// Accepts a vote for delivery. The acknowledgment is decoupled from
/// delivery: a saturated queue drops the event but the submission still
/// succeeds, so write availability survives backend pressure.
async fn cast_vote(
    Extension(state): Extension<AppState>,
    ApiJson(req): ApiJson<VoteRequest>,
) -> StatusCode {
    debug!(choice = %req.choice, "casting vote");
    if !state.queue.enqueue(VoteEvent::new(req)) {
        warn!("vote queue full, dropping vote before delivery");
    }
    state.votes_cast.increment();
    StatusCode::ACCEPTED
}

#[derive(Debug, Clone, Serialize)]
struct PollChoice {
    text: String,
    image: String,
}

#[derive(Serialize)]
struct PollView {
    question: String,
    choices: Vec<PollChoice>,
}

/// Poll metadata for the UI: the configured question and choice list.
async fn get_poll(Extension(state): Extension<AppState>) -> Json<PollView> {
    let config = &state.config;
    let choices = config
        .choices
        .iter()
        .enumerate()
        .map(|(i, text)| PollChoice {
            text: text.clone(),
            image: config.images.get(i).cloned().unwrap_or_default(),
        })
        .collect();
    Json(PollView {
        question: config.question.clone(),
        choices,
    })
}

async fn health(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "queue_depth": state.queue.len(),
        "queue_capacity": state.queue.capacity(),
    }))
}
