use std::fmt;

use crate::error::WidgetError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Clear,
    Progress(Progress),
    Notice(Notice),
    /// Locally generated, never derived from a network response.
    Guidance(Guidance),
    LoadFailed(WidgetError),
    Failed(WidgetError),
    /// The credential store could not be written.
    StoreFailed(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Status::LoadFailed(_) | Status::Failed(_) | Status::StoreFailed(_)
        )
    }

    pub fn is_guidance(&self) -> bool {
        matches!(self, Status::Guidance(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Clear => Ok(()),
            Status::Progress(p) => write!(f, "{}", p),
            Status::Notice(n) => write!(f, "{}", n),
            Status::Guidance(g) => write!(f, "{}", g),
            Status::LoadFailed(_) => write!(f, "Failed to load comments."),
            Status::Failed(e) => write!(f, "{}", e),
            Status::StoreFailed(msg) => write!(f, "Local credential storage failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    LoadingComments,
    LoggingIn,
    Registering,
    SubmittingComment,
    PostingReply,
    UpdatingLike,
    SigningOut,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Progress::LoadingComments => "Loading comments...",
            Progress::LoggingIn => "Logging in...",
            Progress::Registering => "Registering...",
            Progress::SubmittingComment => "Submitting comment...",
            Progress::PostingReply => "Posting reply...",
            Progress::UpdatingLike => "Updating like...",
            Progress::SigningOut => "Signing out...",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Welcome(String),
    RegisteredPleaseLogIn,
    CommentPosted,
    ReplyPosted,
    SignedOut,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Welcome(name) => write!(f, "Welcome, {}!", name),
            Notice::RegisteredPleaseLogIn => f.write_str("Registered. Please log in."),
            Notice::CommentPosted => f.write_str("Comment posted!"),
            Notice::ReplyPosted => f.write_str("Reply posted!"),
            Notice::SignedOut => f.write_str("Signed out."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guidance {
    LogInToComment,
    LogInToReply,
    LogInToLike,
    EmptyComment,
    CommentTooLong { max: usize },
}

impl Guidance {
    pub fn error(&self) -> WidgetError {
        match self {
            Guidance::LogInToComment | Guidance::LogInToReply | Guidance::LogInToLike => {
                WidgetError::AuthRequired
            }
            other => WidgetError::Validation(other.to_string()),
        }
    }
}

impl fmt::Display for Guidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guidance::LogInToComment => f.write_str("Please log in before commenting."),
            Guidance::LogInToReply => f.write_str("Please log in before replying."),
            Guidance::LogInToLike => f.write_str("Please log in before liking."),
            Guidance::EmptyComment => f.write_str("Content cannot be empty."),
            Guidance::CommentTooLong { max } => {
                write!(f, "Content is too long (max {} characters).", max)
            }
        }
    }
}
