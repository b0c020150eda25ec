//! Resolves a root hash into a fully owned node tree.
//!
//! Every reference is resolved again, so a hash reached along two paths
//! yields two independent nodes. There is no cycle protection; a well-formed
//! store cannot contain object cycles.

use crate::error::Result;
use crate::git::cache::{CacheStats, ObjectCache};
use crate::git::object::{DecodedObject, ObjectHash};
use crate::git::store::ObjectStore;
use crate::models::GraphNode;

pub struct GraphBuilder {
    store: ObjectStore,
    cache: Option<ObjectCache>,
}

impl GraphBuilder {
    pub fn new(store: ObjectStore) -> Self {
        Self { store, cache: None }
    }

    /// Memoizes decoded objects so repeated hashes are read from disk once.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(ObjectCache::new());
        self
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ObjectCache::stats)
    }

    fn fetch(&mut self, hash: &ObjectHash) -> Result<Option<DecodedObject>> {
        match self.cache.as_mut() {
            Some(cache) => cache.get_or_load(&self.store, hash),
            None => self.store.load(hash),
        }
    }

    /// Builds the subtree rooted at `hash`. `description` is the tree entry
    /// name the object was reached through, if any.
    pub fn build(&mut self, hash: &ObjectHash, description: Option<&str>) -> Result<GraphNode> {
        let Some(object) = self.fetch(hash)? else {
            tracing::warn!("Object {} not found. Skipping.", hash);
            return Ok(GraphNode::missing(hash));
        };

        let node = match object {
            DecodedObject::Commit(commit) => {
                let mut children = Vec::with_capacity(1 + commit.parents.len());
                children.push(self.build(&commit.tree, None)?);
                for parent in &commit.parents {
                    children.push(self.build(parent, None)?);
                }
                GraphNode::commit(hash, &commit, children)
            }
            DecodedObject::Tree(entries) => {
                let children = entries
                    .iter()
                    .map(|entry| self.build(&entry.hash, Some(&entry.name)))
                    .collect::<Result<Vec<_>>>()?;
                GraphNode::tree(hash, children)
            }
            DecodedObject::Blob => GraphNode::blob(hash),
        };

        Ok(match description {
            Some(description) => node.with_description(description),
            None => node,
        })
    }
}
