//! Plain-text rendering for the terminal front end.

use domain::{CommentTree, Status};
use std::fmt::Write;

const INDENT: &str = "    ";

pub fn render_tree(tree: &CommentTree) -> String {
    if tree.is_empty() {
        return "No comments yet.\n".to_string();
    }

    let mut out = String::new();
    for (depth, c) in tree.walk() {
        let pad = INDENT.repeat(depth);
        let liked = if c.liked_by_viewer { " (liked)" } else { "" };
        let _ = writeln!(
            out,
            "{pad}#{} {} • {}",
            c.id, c.author_name, c.created_at
        );
        for line in c.content.lines() {
            let _ = writeln!(out, "{pad}  {}", line);
        }
        let _ = writeln!(out, "{pad}  [like {}{}]", c.like_count, liked);
    }
    out
}

pub fn render_status(status: &Status) -> Option<String> {
    match status {
        Status::Clear => None,
        s if s.is_error() => Some(format!("! {}", s)),
        s => Some(format!("» {}", s)),
    }
}
