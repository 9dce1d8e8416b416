//! Response types (Serialize)

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Acknowledgement returned by `POST /api/fortune/sessions/{id}/complete`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionAck {
    pub message: &'static str,
    pub session_id: i64,
    pub summary: String,
}
