use anyhow::{Context, Result};
use async_trait::async_trait;
use domain::protocol::{
    error_message, AuthRequest, CommentList, LoginResponse, NewComment, RegisterResponse,
};
use domain::{CommentId, CommentTree, ContentId, Credential, WidgetError};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::common::url_utils::sanitize_base_url;
use crate::traits::CommentService;

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub api_base: String,
    /// `None` leaves in-flight requests unbounded.
    pub timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct HttpCommentService {
    base: Url,
    client: Client,
}

impl HttpCommentService {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let base = sanitize_base_url(&config.api_base)?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // sanitize_base_url 已排除 cannot-be-a-base
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, WidgetError> {
        let resp = req
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!("Comment service answered {}: {}", status, message);
        Err(WidgetError::Request(message))
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, WidgetError> {
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| WidgetError::Request(format!("Unexpected response from server: {}", e)))
    }

    fn require(credential: Option<&Credential>) -> Result<&Credential, WidgetError> {
        credential.ok_or(WidgetError::AuthRequired)
    }
}

#[async_trait]
impl CommentService for HttpCommentService {
    async fn fetch_comments(
        &self,
        content_id: &ContentId,
        credential: Option<&Credential>,
    ) -> Result<CommentTree, WidgetError> {
        let mut url = self.endpoint(&["api", "comments"]);
        url.query_pairs_mut()
            .append_pair("post_id", content_id.as_str());
        debug!("GET {}", url);

        let mut req = self.client.get(url);
        if let Some(c) = credential {
            req = req.bearer_auth(&c.token);
        }

        let list: CommentList = Self::decode(self.send(req).await?).await?;
        Ok(CommentTree::new(list.items))
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, WidgetError> {
        let url = self.endpoint(&["api", "users", "login"]);
        debug!("POST {} as {}", url, username);
        let req = self.client.post(url).json(&AuthRequest {
            username: username.to_string(),
            password: password.to_string(),
        });
        Self::decode(self.send(req).await?).await
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RegisterResponse, WidgetError> {
        let url = self.endpoint(&["api", "users", "register"]);
        debug!("POST {} as {}", url, username);
        let req = self.client.post(url).json(&AuthRequest {
            username: username.to_string(),
            password: password.to_string(),
        });
        Self::decode(self.send(req).await?).await
    }

    async fn post_comment(
        &self,
        content_id: &ContentId,
        content: &str,
        parent_id: Option<&CommentId>,
        credential: Option<&Credential>,
    ) -> Result<(), WidgetError> {
        let credential = Self::require(credential)?;
        let url = self.endpoint(&["api", "comments"]);
        debug!("POST {} (reply_to={:?})", url, parent_id);

        let req = self
            .client
            .post(url)
            .bearer_auth(&credential.token)
            .json(&NewComment {
                post_id: content_id.as_str().to_string(),
                content: content.to_string(),
                parent_comment_id: parent_id.cloned(),
            });
        self.send(req).await?;
        Ok(())
    }

    async fn like_comment(
        &self,
        comment_id: &CommentId,
        credential: Option<&Credential>,
    ) -> Result<(), WidgetError> {
        let credential = Self::require(credential)?;
        let id = comment_id.to_string();
        let url = self.endpoint(&["api", "comments", &id, "like"]);
        debug!("POST {}", url);

        let req = self.client.post(url).bearer_auth(&credential.token);
        self.send(req).await?;
        Ok(())
    }
}
