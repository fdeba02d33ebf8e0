pub mod cache;
pub mod error;
pub mod schema;

pub use cache::{CacheRecord, DatabaseCache, FileCache, ItemType, MemoryCache, ObjectCache};
pub use error::*;
