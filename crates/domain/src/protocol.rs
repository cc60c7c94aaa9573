//! Wire shapes exchanged with the comment service.

use crate::models::{Comment, CommentId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CommentList {
    #[serde(default)]
    pub items: Vec<Comment>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// A missing token means the account exists but the user still has to log in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,
}

/// Turns a failed response body into the message surfaced to the user.
/// The service wraps errors as `{"detail": "..."}`; anything else is passed through.
pub fn error_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return GENERIC_FAILURE.to_string();
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(detail) = map.get("detail").and_then(|v| v.as_str()) {
            if !detail.trim().is_empty() {
                return detail.trim().to_string();
            }
        }
    }

    body.to_string()
}
