pub mod json_store;
pub mod kv;
pub mod lock;
pub mod planner_io;
pub mod watcher;

pub use json_store::JsonFileStore;
pub use kv::{KvStore, MemoryStore, StoreError};
