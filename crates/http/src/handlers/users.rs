use axum::{Json, extract::State};
use std::sync::Arc;

use fortune_core::{Profile, ProfileInput, User, UserUpsert};
use fortune_service::UserWithProfile;

use crate::AppState;
use crate::api_error::ApiError;
use crate::extract::ApiJson;
use crate::query_types::ProfileRequest;
use crate::requester::Requester;

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    requester: Requester,
) -> Result<Json<UserWithProfile>, ApiError> {
    Ok(Json(state.profiles.get_user_with_profile(requester.id()).await?))
}

/// The id always comes from the requester, never from the body.
pub async fn upsert_user(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    ApiJson(body): ApiJson<UserUpsert>,
) -> Result<Json<User>, ApiError> {
    let upsert = UserUpsert { id: requester.0, ..body };
    Ok(Json(state.profiles.upsert_user(&upsert).await?))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    requester: Requester,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.profiles.get_profile(requester.id()).await?))
}

pub async fn save_profile(
    State(state): State<Arc<AppState>>,
    requester: Requester,
    ApiJson(req): ApiJson<ProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let input = ProfileInput::parse(
        req.birth_date.as_deref(),
        req.birth_time.as_deref(),
        req.birth_location.as_deref(),
        req.gender.as_deref(),
        req.preferred_fortune_types,
    )?;
    Ok(Json(state.profiles.save_profile(requester.id(), &input).await?))
}
