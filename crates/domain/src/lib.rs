mod commands;
mod error;
mod models;
pub mod protocol;
mod status;
mod tree;

pub use commands::Intent;
pub use error::WidgetError;
pub use models::{Comment, CommentId, ContentId, Credential};
pub use status::{Guidance, Notice, Progress, Status};
pub use tree::{CommentTree, Walk};
