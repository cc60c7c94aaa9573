pub mod config;
mod controller;
mod model;
pub mod render;

pub use controller::{Outcome, Phase, SyncController};
pub use model::CommentTreeModel;
