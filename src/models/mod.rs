//! In-memory graph model.
//!
//! - `node`: GraphNode, NodeKind and label construction

pub mod node;

pub use node::*;
