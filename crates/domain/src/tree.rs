use serde::{Deserialize, Serialize};

use crate::models::{Comment, CommentId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentTree(Vec<Comment>);

impl CommentTree {
    pub fn new(roots: Vec<Comment>) -> Self {
        Self(roots)
    }

    pub fn roots(&self) -> &[Comment] {
        &self.0
    }

    pub fn into_roots(self) -> Vec<Comment> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> usize {
        self.walk().count()
    }

    pub fn find(&self, id: &CommentId) -> Option<&Comment> {
        self.walk().map(|(_, c)| c).find(|c| c.id == *id)
    }

    // 先序遍历，用显式栈避免深层回复链爆栈
    pub fn find_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        let mut stack: Vec<&mut Comment> = self.0.iter_mut().rev().collect();
        while let Some(node) = stack.pop() {
            if node.id == *id {
                return Some(node);
            }
            stack.extend(node.replies.iter_mut().rev());
        }
        None
    }

    /// Flips `liked_by_viewer` and moves `like_count` by one. Returns false, leaving
    /// the tree untouched, when no comment carries `id`.
    pub fn toggle_like(&mut self, id: &CommentId) -> bool {
        match self.find_mut(id) {
            Some(comment) => {
                comment.toggle_like();
                true
            }
            None => false,
        }
    }

    /// Preorder traversal yielding `(depth, comment)`, top-level comments at depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.0.iter().rev().map(|c| (0, c)).collect(),
        }
    }
}

impl From<Vec<Comment>> for CommentTree {
    fn from(roots: Vec<Comment>) -> Self {
        Self(roots)
    }
}

pub struct Walk<'a> {
    stack: Vec<(usize, &'a Comment)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Comment);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.replies.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}
