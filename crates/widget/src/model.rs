use std::sync::atomic::{AtomicU64, Ordering};

use domain::{CommentId, CommentTree};
use tokio::sync::watch;

/// Current comment tree for one content identifier.
/// Readers get snapshots; only the controller mutates it.
pub struct CommentTreeModel {
    tx: watch::Sender<CommentTree>,
    // 每次整体替换加一，只在 watch 写锁内读写
    revision: AtomicU64,
}

impl CommentTreeModel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CommentTree::default());
        Self {
            tx,
            revision: AtomicU64::new(0),
        }
    }

    pub fn replace(&self, tree: CommentTree) {
        self.tx.send_modify(|current| {
            *current = tree;
            self.revision.fetch_add(1, Ordering::SeqCst);
        });
    }

    pub fn snapshot(&self) -> CommentTree {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CommentTree> {
        self.tx.subscribe()
    }

    /// Visual-only like flip ahead of server confirmation. Missing ids are ignored,
    /// the tree may have been replaced since the user clicked.
    ///
    /// Returns the revision the flip was applied to, `None` if nothing changed.
    pub fn toggle_like_optimistic(&self, id: &CommentId) -> Option<u64> {
        let mut applied = None;
        self.tx.send_if_modified(|tree| {
            if tree.toggle_like(id) {
                applied = Some(self.revision.load(Ordering::SeqCst));
                true
            } else {
                false
            }
        });
        applied
    }

    /// Undoes an optimistic flip, unless a newer snapshot has replaced the tree since.
    pub fn revert_like(&self, id: &CommentId, revision: u64) -> bool {
        self.tx.send_if_modified(|tree| {
            self.revision.load(Ordering::SeqCst) == revision && tree.toggle_like(id)
        })
    }
}

impl Default for CommentTreeModel {
    fn default() -> Self {
        Self::new()
    }
}
