// ============================================================================
// STORAGE - Almacenamiento clave/valor persistente del dispositivo
// ============================================================================
// Compartido por el token (AuthService / ApiClient) y la preferencia de tema
// (ThemeState). Cada clave tiene un único dueño, por eso no hay locking.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("No se pudo acceder a localStorage")]
    Unavailable,
    #[error("Error de almacenamiento: {0}")]
    Operation(String),
}

/// Almacén clave/valor asíncrono (strings opacos)
#[async_trait(?Send)]
pub trait KeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Almacén en memoria. Cuenta escrituras (set/remove).
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.items.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    /// Lectura síncrona, útil para inspección
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStore, StorageError};
    use async_trait::async_trait;
    use web_sys::{window, Storage};

    fn get_local_storage() -> Option<Storage> {
        window()?.local_storage().ok()?
    }

    /// `window.localStorage` del navegador
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageStore;

    #[async_trait(?Send)]
    impl KeyValueStore for LocalStorageStore {
        async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
            storage.get_item(key)
                .map_err(|e| StorageError::Operation(format!("get_item({}): {:?}", key, e)))
        }

        async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
            storage.set_item(key, value)
                .map_err(|e| StorageError::Operation(format!("set_item({}): {:?}", key, e)))
        }

        async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
            storage.remove_item(key)
                .map_err(|e| StorageError::Operation(format!("remove_item({}): {:?}", key, e)))
        }
    }
}
