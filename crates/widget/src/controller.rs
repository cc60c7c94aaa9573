use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use adapter::CommentService;
use domain::{
    CommentId, CommentTree, ContentId, Credential, Guidance, Notice, Progress, Status, WidgetError,
};
use storage::CredentialStore;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::model::CommentTreeModel;

/// Matches the service's own content limit.
pub const DEFAULT_MAX_COMMENT_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
}

/// Completion signal handed back to the presentation layer. Errors never escape
/// as `Err`; the same information is also published as a `Status`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Whitespace-only reply: nothing sent, nothing published.
    Dropped,
    Rejected(Guidance),
    Failed(WidgetError),
    /// The local credential store failed; the service call itself may have succeeded.
    StoreFailed(String),
}

pub struct SyncController {
    api: Arc<dyn CommentService>,
    store: Arc<dyn CredentialStore>,
    content_id: ContentId,
    model: CommentTreeModel,
    status: watch::Sender<Status>,
    phase: watch::Sender<Phase>,
    loads_in_flight: AtomicUsize,
    has_snapshot: AtomicBool,
    max_comment_chars: usize,
}

impl SyncController {
    pub fn new(
        api: Arc<dyn CommentService>,
        store: Arc<dyn CredentialStore>,
        content_id: ContentId,
    ) -> Self {
        let (status, _) = watch::channel(Status::Clear);
        let (phase, _) = watch::channel(Phase::Idle);
        Self {
            api,
            store,
            content_id,
            model: CommentTreeModel::new(),
            status,
            phase,
            loads_in_flight: AtomicUsize::new(0),
            has_snapshot: AtomicBool::new(false),
            max_comment_chars: DEFAULT_MAX_COMMENT_CHARS,
        }
    }

    pub fn with_max_comment_chars(mut self, max: usize) -> Self {
        self.max_comment_chars = max;
        self
    }

    pub fn content_id(&self) -> &ContentId {
        &self.content_id
    }

    pub fn tree(&self) -> CommentTree {
        self.model.snapshot()
    }

    pub fn subscribe_tree(&self) -> watch::Receiver<CommentTree> {
        self.model.subscribe()
    }

    pub fn status(&self) -> Status {
        self.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<Status> {
        self.status.subscribe()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.credential().await.is_some()
    }

    fn publish(&self, status: Status) {
        debug!("status: {:?}", status);
        self.status.send_replace(status);
    }

    /// Store read failures are treated as "not logged in".
    async fn credential(&self) -> Option<Credential> {
        match self.store.get().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to read credential: {:?}", e);
                None
            }
        }
    }

    // --- Load ---

    pub async fn load(&self) -> Outcome {
        match self.reload().await {
            Ok(()) => Outcome::Completed,
            Err(e) => Outcome::Failed(e),
        }
    }

    async fn reload(&self) -> Result<(), WidgetError> {
        self.loads_in_flight.fetch_add(1, Ordering::SeqCst);
        self.phase.send_replace(Phase::Loading);
        self.publish(Status::Progress(Progress::LoadingComments));

        let credential = self.credential().await;
        let result = self
            .api
            .fetch_comments(&self.content_id, credential.as_ref())
            .await;

        let outcome = match result {
            Ok(tree) => {
                info!(
                    "Loaded {} comment(s) for {}",
                    tree.total(),
                    self.content_id
                );
                self.model.replace(tree);
                self.has_snapshot.store(true, Ordering::SeqCst);
                self.publish(Status::Clear);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load comments for {}: {}", self.content_id, e);
                self.publish(Status::LoadFailed(e.clone()));
                Err(e)
            }
        };

        // 最后一个返回的请求决定阶段
        if self.loads_in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            let settled = if self.has_snapshot.load(Ordering::SeqCst) {
                Phase::Ready
            } else {
                Phase::Idle
            };
            self.phase.send_replace(settled);
        }
        outcome
    }

    // --- Auth ---

    pub async fn login(&self, username: &str, password: &str) -> Outcome {
        self.publish(Status::Progress(Progress::LoggingIn));
        match self.api.login(username, password).await {
            Ok(resp) => {
                if let Err(outcome) = self.save_credential(Credential::new(resp.token)).await {
                    return outcome;
                }
                info!("Logged in as {}", resp.username);
                self.publish(Status::Notice(Notice::Welcome(resp.username)));
                Outcome::Completed
            }
            Err(e) => {
                warn!("Login failed for {}: {}", username, e);
                self.publish(Status::Failed(e.clone()));
                Outcome::Failed(e)
            }
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> Outcome {
        self.publish(Status::Progress(Progress::Registering));
        match self.api.register(username, password).await {
            Ok(resp) => match resp.token {
                Some(token) => {
                    if let Err(outcome) = self.save_credential(Credential::new(token)).await {
                        return outcome;
                    }
                    info!("Registered and logged in as {}", resp.username);
                    self.publish(Status::Notice(Notice::Welcome(resp.username)));
                    Outcome::Completed
                }
                None => {
                    info!("Registered {}, awaiting separate login", resp.username);
                    self.publish(Status::Notice(Notice::RegisteredPleaseLogIn));
                    Outcome::Completed
                }
            },
            Err(e) => {
                warn!("Registration failed for {}: {}", username, e);
                self.publish(Status::Failed(e.clone()));
                Outcome::Failed(e)
            }
        }
    }

    /// Forgets the stored credential. The tree is left as is until the next load.
    pub async fn logout(&self) -> Outcome {
        self.publish(Status::Progress(Progress::SigningOut));
        if let Err(e) = self.store.clear().await {
            error!("Failed to clear credential: {:?}", e);
            let msg = e.to_string();
            self.publish(Status::StoreFailed(msg.clone()));
            return Outcome::StoreFailed(msg);
        }
        info!("Signed out");
        self.publish(Status::Notice(Notice::SignedOut));
        Outcome::Completed
    }

    async fn save_credential(&self, credential: Credential) -> Result<(), Outcome> {
        self.store.set(&credential).await.map_err(|e| {
            error!("Failed to persist credential: {:?}", e);
            let msg = e.to_string();
            self.publish(Status::StoreFailed(msg.clone()));
            Outcome::StoreFailed(msg)
        })
    }

    fn reject(&self, guidance: Guidance) -> Outcome {
        debug!("Rejected locally: {}", guidance);
        self.publish(Status::Guidance(guidance.clone()));
        Outcome::Rejected(guidance)
    }

    // --- Mutations ---

    pub async fn submit(&self, content: &str) -> Outcome {
        let Some(credential) = self.credential().await else {
            return self.reject(Guidance::LogInToComment);
        };
        if content.trim().is_empty() {
            return self.reject(Guidance::EmptyComment);
        }
        if content.chars().count() > self.max_comment_chars {
            return self.reject(Guidance::CommentTooLong {
                max: self.max_comment_chars,
            });
        }

        self.publish(Status::Progress(Progress::SubmittingComment));
        if let Err(e) = self
            .api
            .post_comment(&self.content_id, content, None, Some(&credential))
            .await
        {
            warn!("Failed to post comment: {}", e);
            self.publish(Status::Failed(e.clone()));
            return Outcome::Failed(e);
        }

        info!("Comment posted to {}", self.content_id);
        if self.reload().await.is_ok() {
            self.publish(Status::Notice(Notice::CommentPosted));
        }
        Outcome::Completed
    }

    pub async fn reply(&self, parent_id: &CommentId, content: &str) -> Outcome {
        let Some(credential) = self.credential().await else {
            return self.reject(Guidance::LogInToReply);
        };
        let content = content.trim();
        if content.is_empty() {
            return Outcome::Dropped;
        }
        if content.chars().count() > self.max_comment_chars {
            return self.reject(Guidance::CommentTooLong {
                max: self.max_comment_chars,
            });
        }

        self.publish(Status::Progress(Progress::PostingReply));
        if let Err(e) = self
            .api
            .post_comment(&self.content_id, content, Some(parent_id), Some(&credential))
            .await
        {
            warn!("Failed to post reply to {}: {}", parent_id, e);
            self.publish(Status::Failed(e.clone()));
            return Outcome::Failed(e);
        }

        info!("Reply to {} posted", parent_id);
        if self.reload().await.is_ok() {
            self.publish(Status::Notice(Notice::ReplyPosted));
        }
        Outcome::Completed
    }

    /// Flips the like locally, sends it, then reloads whatever the call returned.
    pub async fn toggle_like(&self, comment_id: &CommentId) -> Outcome {
        let Some(credential) = self.credential().await else {
            return self.reject(Guidance::LogInToLike);
        };

        let applied = self.model.toggle_like_optimistic(comment_id);
        self.publish(Status::Progress(Progress::UpdatingLike));
        let result = self.api.like_comment(comment_id, Some(&credential)).await;
        let reloaded = self.reload().await;

        match result {
            Ok(()) => {
                info!("Like toggled on {}", comment_id);
                Outcome::Completed
            }
            Err(e) => {
                warn!("Failed to toggle like on {}: {}", comment_id, e);
                // 刷新也失败时撤回本地翻转，回到上一次服务端快照
                if let (Err(_), Some(revision)) = (&reloaded, applied) {
                    self.model.revert_like(comment_id, revision);
                }
                self.publish(Status::Failed(e.clone()));
                Outcome::Failed(e)
            }
        }
    }
}
