//! Graph nodes built from the object store.
//!
//! - `NodeKind`: commit, tree, blob, or missing (hash not in the store)
//! - `GraphNode`: labeled node that exclusively owns its children

use std::fmt;

use crate::git::object::{CommitData, ObjectHash};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Commit,
    Tree,
    Blob,
    Missing,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Commit => "commit",
            NodeKind::Tree => "tree",
            NodeKind::Blob => "blob",
            NodeKind::Missing => "missing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub kind: NodeKind,
    pub short_id: String,
    pub label: String,
    /// Set by mark propagation; only ever goes from false to true.
    pub marked: bool,
    /// A commit's tree then its parents; a tree's entries in stored order.
    pub children: Vec<GraphNode>,
}

impl GraphNode {
    fn new(kind: NodeKind, hash: &ObjectHash, label: String, children: Vec<GraphNode>) -> Self {
        Self {
            kind,
            short_id: hash.short_id().to_string(),
            label,
            marked: false,
            children,
        }
    }

    pub fn missing(hash: &ObjectHash) -> Self {
        Self::new(NodeKind::Missing, hash, format!("[missing] {}", hash), Vec::new())
    }

    pub fn commit(hash: &ObjectHash, commit: &CommitData, children: Vec<GraphNode>) -> Self {
        let label = format!(
            "[commit] {}\nAuthor: {}\nDate: {}",
            hash.short_id(),
            commit.author_name,
            commit.author_date()
        );
        Self::new(NodeKind::Commit, hash, label, children)
    }

    pub fn tree(hash: &ObjectHash, children: Vec<GraphNode>) -> Self {
        Self::new(NodeKind::Tree, hash, format!("[tree] {}", hash.short_id()), children)
    }

    pub fn blob(hash: &ObjectHash) -> Self {
        Self::new(NodeKind::Blob, hash, format!("[blob] {}", hash.short_id()), Vec::new())
    }

    /// Appends the tree entry name this node was reached through.
    pub fn with_description(mut self, description: &str) -> Self {
        self.label.push('\n');
        self.label.push_str(description);
        self
    }

    pub fn mark(&mut self) {
        self.marked = true;
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(GraphNode::node_count).sum::<usize>()
    }

    pub fn marked_count(&self) -> usize {
        usize::from(self.marked) + self.children.iter().map(GraphNode::marked_count).sum::<usize>()
    }
}
