//! Mark propagation.
//!
//! A blob whose label contains the target name is marked, and so is every
//! node on the path up to and including its nearest enclosing commit. A
//! commit absorbs the match: its own parent commits are only marked if
//! something in their own trees matches.

use crate::models::{GraphNode, NodeKind};

/// Marks every node that is, or owns within its commit, a matching blob.
/// Running it twice with the same target changes nothing.
pub fn propagate(root: &mut GraphNode, target_name: &str) {
    mark_subtree(root, target_name);
}

fn mark_subtree(node: &mut GraphNode, target_name: &str) -> bool {
    let mut found = node.kind == NodeKind::Blob && node.label.contains(target_name);

    for child in &mut node.children {
        if mark_subtree(child, target_name) {
            found = true;
        }
    }

    if found {
        node.mark();
    }

    // Commit boundary
    if node.kind == NodeKind::Commit {
        return false;
    }
    found
}
