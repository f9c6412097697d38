// Utils compartidos

pub mod constants;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod spawn;

pub use constants::*;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
#[cfg(target_arch = "wasm32")]
pub use spawn::BrowserSpawner;
