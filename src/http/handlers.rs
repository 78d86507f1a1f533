use crate::domain::model::{
    ContactSubmission, CultureQuizResult, CultureQuizSubmission, FormKind, QuizEmailSubmission,
    RoiSubmission, SubmissionPage,
};
use crate::domain::ports::{DocumentStore, Notifier};
use crate::domain::roi::RoiResult;
use crate::http::AppState;
use crate::utils::error::GatewayError;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_LIMIT: usize = 50;
const MAX_PAGE_LIMIT: usize = 200;

/// Response envelope shared by every endpoint; `result` is present only for
/// forms that evaluate to one.
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiSuccess<T> {
    fn new(result: Option<T>) -> Json<Self> {
        Json(Self {
            success: true,
            result,
        })
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn submit_contact<S: DocumentStore + 'static, N: Notifier + 'static>(
    State(state): State<AppState<S, N>>,
    Json(payload): Json<ContactSubmission>,
) -> Result<Json<ApiSuccess<serde_json::Value>>, GatewayError> {
    let processed = state.pipeline.process(payload).await?;
    Ok(ApiSuccess::new(processed.outcome))
}

pub async fn submit_roi<S: DocumentStore + 'static, N: Notifier + 'static>(
    State(state): State<AppState<S, N>>,
    Json(payload): Json<RoiSubmission>,
) -> Result<Json<ApiSuccess<RoiResult>>, GatewayError> {
    let processed = state.pipeline.process(payload).await?;
    Ok(ApiSuccess::new(processed.outcome))
}

pub async fn submit_culture_quiz<S: DocumentStore + 'static, N: Notifier + 'static>(
    State(state): State<AppState<S, N>>,
    Json(payload): Json<CultureQuizSubmission>,
) -> Result<Json<ApiSuccess<CultureQuizResult>>, GatewayError> {
    let processed = state.pipeline.process(payload).await?;
    Ok(ApiSuccess::new(processed.outcome))
}

pub async fn submit_quiz_email<S: DocumentStore + 'static, N: Notifier + 'static>(
    State(state): State<AppState<S, N>>,
    Json(payload): Json<QuizEmailSubmission>,
) -> Result<Json<ApiSuccess<serde_json::Value>>, GatewayError> {
    let processed = state.pipeline.process(payload).await?;
    Ok(ApiSuccess::new(processed.outcome))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub async fn list_submissions<S: DocumentStore + 'static, N: Notifier + 'static>(
    State(state): State<AppState<S, N>>,
    Path(kind): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiSuccess<SubmissionPage>>, GatewayError> {
    let kind: FormKind = kind.parse()?;
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let page = state.store.list(kind.collection(), limit, offset).await?;
    Ok(ApiSuccess::new(Some(page)))
}
