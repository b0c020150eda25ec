//! DOT serialization of the marked subgraph.
//!
//! Output grammar:
//! ```text
//! digraph G {
//!     "<parent label>" -> "<child label>"
//! }
//! ```
//! Labels are written verbatim, embedded newlines included. Edges are
//! deduplicated and emitted in first-seen depth-first order.

use std::collections::HashSet;

use crate::models::GraphNode;

pub fn serialize(root: &GraphNode) -> String {
    let mut edges = Vec::new();
    let mut seen = HashSet::new();
    collect_edges(root, &mut edges, &mut seen);

    let mut out = String::from("digraph G {\n");
    for edge in edges {
        out.push_str(&edge);
    }
    out.push('}');
    out
}

fn collect_edges(node: &GraphNode, edges: &mut Vec<String>, seen: &mut HashSet<String>) {
    if !node.marked {
        return;
    }

    for child in node.children.iter().filter(|c| c.marked) {
        let edge = format!("    \"{}\" -> \"{}\"\n", node.label, child.label);
        if seen.insert(edge.clone()) {
            edges.push(edge);
        }
        collect_edges(child, edges, seen);
    }
}
