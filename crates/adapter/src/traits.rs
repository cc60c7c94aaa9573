use async_trait::async_trait;
use domain::protocol::{LoginResponse, RegisterResponse};
use domain::{CommentId, CommentTree, ContentId, Credential, WidgetError};

#[async_trait]
pub trait CommentService: Send + Sync {
    /// The credential only changes which `liked_by_viewer` flags come back.
    async fn fetch_comments(
        &self,
        content_id: &ContentId,
        credential: Option<&Credential>,
    ) -> Result<CommentTree, WidgetError>;

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, WidgetError>;

    async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RegisterResponse, WidgetError>;

    /// Fails with `AuthRequired` when `credential` is `None`.
    async fn post_comment(
        &self,
        content_id: &ContentId,
        content: &str,
        parent_id: Option<&CommentId>,
        credential: Option<&Credential>,
    ) -> Result<(), WidgetError>;

    /// Fails with `AuthRequired` when `credential` is `None`.
    async fn like_comment(
        &self,
        comment_id: &CommentId,
        credential: Option<&Credential>,
    ) -> Result<(), WidgetError>;
}
