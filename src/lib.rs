//! Builds a commit/tree/blob graph straight from a repository's loose
//! object store and filters it down to the objects that touch one file.
//!
//! Pipeline: branch head → `GraphBuilder` → `propagate` → `serialize`.

pub mod config;
pub mod error;
pub mod git;
pub mod graph;
pub mod models;
pub mod render;

use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::git::{GitDir, ObjectStore};
use crate::graph::{GraphBuilder, propagate, serialize};
use crate::models::GraphNode;

/// Builds the full graph for the configured branch and marks it for the
/// configured target file.
pub fn build_marked_graph(config: &Config, memoize: bool) -> Result<GraphNode> {
    let git_dir = GitDir::discover(&config.repo_path)?;
    let head = git_dir.branch_head(&config.branch)?;
    tracing::info!("Branch {} is at {}", config.branch, head);

    let mut builder = GraphBuilder::new(ObjectStore::open(&git_dir));
    if memoize {
        builder = builder.with_cache();
    }

    let start = Instant::now();
    let mut root = builder.build(&head, None)?;
    tracing::info!("Built {} nodes in {:?}", root.node_count(), start.elapsed());
    if let Some(stats) = builder.cache_stats() {
        tracing::info!(
            "Object cache: {} entries, {} hits, {} misses",
            stats.entries,
            stats.hits,
            stats.misses
        );
    }

    propagate(&mut root, &config.target_file);
    tracing::info!("Marked {} nodes for {}", root.marked_count(), config.target_file);

    Ok(root)
}

/// Produces the DOT description of the subgraph touching the target file.
pub fn generate_dot(config: &Config, memoize: bool) -> Result<String> {
    let root = build_marked_graph(config, memoize)?;
    Ok(serialize(&root))
}
