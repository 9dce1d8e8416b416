//! Requester identity extractor.
//!
//! Authentication happens upstream; the authenticated user id arrives in the
//! `X-User-Id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::api_error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller. Extracting this rejects anonymous requests with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester(pub String);

impl Requester {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Requester {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("missing X-User-Id header".to_owned()))?;
        let id = value
            .to_str()
            .map_err(|_| ApiError::Unauthorized("invalid X-User-Id header encoding".to_owned()))?
            .trim();
        if id.is_empty() {
            return Err(ApiError::Unauthorized("empty X-User-Id header".to_owned()));
        }
        Ok(Self(id.to_owned()))
    }
}
