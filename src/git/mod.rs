pub mod cache;
pub mod object;
pub mod refs;
pub mod store;

pub use cache::{CacheStats, ObjectCache};
pub use object::{CommitData, DecodedObject, ObjectHash, ObjectKind, TreeEntry};
pub use refs::GitDir;
pub use store::ObjectStore;
