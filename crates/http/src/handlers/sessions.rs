use axum::{Json, extract::State};
use std::sync::Arc;

use fortune_core::{COMPLETION_ACK, Message, Session};
use fortune_service::SessionDetail;

use crate::AppState;
use crate::api_error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query_types::{HoursQuery, SendMessageRequest, StartSessionRequest};
use crate::requester::Requester;
use crate::response_types::CompletionAck;

pub async fn start_session(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    ApiJson(req): ApiJson<StartSessionRequest>,
) -> Result<Json<Session>, ApiError> {
    let session = state
        .fortune
        .start(
            requester.id(),
            req.fortune_type.as_deref().unwrap_or_default(),
            req.title.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(session))
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    requester: Requester,
) -> Result<Json<Vec<Session>>, ApiError> {
    Ok(Json(state.fortune.list_sessions(requester.id()).await?))
}

pub async fn recent_sessions(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    ApiQuery(query): ApiQuery<HoursQuery>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let hours = query.or_default(state.recent_hours);
    Ok(Json(state.fortune.recent_sessions(requester.id(), hours).await?))
}

pub async fn old_sessions(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    ApiQuery(query): ApiQuery<HoursQuery>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let hours = query.or_default(state.recent_hours);
    Ok(Json(state.fortune.old_sessions(requester.id(), hours).await?))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<SessionDetail>, ApiError> {
    Ok(Json(state.fortune.get_session_detail(id, requester.id()).await?))
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> Result<Json<Message>, ApiError> {
    let text = req.message.as_deref().unwrap_or_default();
    Ok(Json(state.fortune.send_message(id, text, requester.id()).await?))
}

pub async fn complete_session(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<CompletionAck>, ApiError> {
    let outcome = state.fortune.complete_session(id, requester.id()).await?;
    Ok(Json(CompletionAck {
        message: COMPLETION_ACK,
        session_id: outcome.session_id,
        summary: outcome.summary,
    }))
}
