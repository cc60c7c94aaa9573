use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound the comment service enforces on `post_id`.
const MAX_CONTENT_ID_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Content ID cannot be empty.".to_string());
        }
        if trimmed.chars().count() > MAX_CONTENT_ID_LEN {
            return Err(format!(
                "Content ID is too long (max {} chars).",
                MAX_CONTENT_ID_LEN
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Explicit configuration wins, then the mount element's attribute, then the page path.
    pub fn resolve(
        configured: Option<&str>,
        mount_attr: Option<&str>,
        page_path: &str,
    ) -> Result<Self, String> {
        let picked = [configured, mount_attr]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(page_path);

        if picked.trim().is_empty() {
            return Self::new("/");
        }
        Self::new(picked)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque comment identifier. The service may hand out numbers or strings;
/// either form is echoed back exactly as it was received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentId {
    Number(u64),
    Text(String),
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentId::Number(n) => write!(f, "{}", n),
            CommentId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for CommentId {
    fn from(n: u64) -> Self {
        CommentId::Number(n)
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> Self {
        CommentId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(rename = "username", default)]
    pub author_name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub liked_by_viewer: bool,
    #[serde(default)]
    pub replies: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Comment {
    pub fn toggle_like(&mut self) {
        if self.liked_by_viewer {
            self.liked_by_viewer = false;
            self.like_count = self.like_count.saturating_sub(1);
        } else {
            self.liked_by_viewer = true;
            self.like_count += 1;
        }
    }
}

/// Bearer credential issued by login or registration. Replaced wholesale, never patched.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_falls_back_in_order() {
        let id = ContentId::resolve(Some("post-42"), Some("attr"), "/a/b").unwrap();
        assert_eq!(id.as_str(), "post-42");

        let id = ContentId::resolve(Some("  "), Some("attr"), "/a/b").unwrap();
        assert_eq!(id.as_str(), "attr");

        let id = ContentId::resolve(None, None, "/2024/hello/").unwrap();
        assert_eq!(id.as_str(), "/2024/hello/");

        let id = ContentId::resolve(None, None, "").unwrap();
        assert_eq!(id.as_str(), "/");
    }

    #[test]
    fn content_id_rejects_overlong() {
        assert!(ContentId::new("x".repeat(256)).is_err());
        assert!(ContentId::new("x".repeat(255)).is_ok());
    }

    #[test]
    fn comment_id_keeps_wire_form() {
        let n: CommentId = serde_json::from_str("7").unwrap();
        assert_eq!(n, CommentId::Number(7));
        assert_eq!(serde_json::to_string(&n).unwrap(), "7");

        let s: CommentId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(s, CommentId::Text("abc".into()));
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"abc\"");
    }

    #[test]
    fn comment_decodes_service_shape() {
        let raw = r#"{
            "id": 3, "post_id": "p", "user_id": 9, "username": "alice",
            "content": "hi", "created_at": "2024-05-01T10:00:00",
            "is_deleted": false, "parent_comment_id": null,
            "like_count": 2, "liked_by_viewer": true, "replies": []
        }"#;
        let c: Comment = serde_json::from_str(raw).unwrap();
        assert_eq!(c.id, CommentId::Number(3));
        assert_eq!(c.author_name, "alice");
        assert_eq!(c.like_count, 2);
        assert!(c.liked_by_viewer);
        assert!(c.parent_comment_id.is_none());
    }

    #[test]
    fn unlike_never_underflows() {
        let mut c: Comment = serde_json::from_str(r#"{"id": 1, "liked_by_viewer": true}"#).unwrap();
        c.toggle_like();
        assert_eq!(c.like_count, 0);
        assert!(!c.liked_by_viewer);
    }

    #[test]
    fn credential_debug_hides_token() {
        let c = Credential::new("secret-token");
        assert!(!format!("{:?}", c).contains("secret-token"));
    }
}
