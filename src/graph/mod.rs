pub mod builder;
pub mod dot;
pub mod mark;

pub use builder::GraphBuilder;
pub use dot::serialize;
pub use mark::propagate;
