mod common;
mod drivers;
mod traits;

pub use common::url_utils::sanitize_base_url;
pub use drivers::http::{HttpCommentService, HttpConfig};
pub use traits::CommentService;
