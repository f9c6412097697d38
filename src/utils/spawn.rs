// Ejecutor de tareas locales del navegador (efectos "fire-and-forget")

use futures::future::LocalFutureObj;
use futures::task::{LocalSpawn, SpawnError};

/// Lanza futures en el event loop del navegador vía `spawn_local`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}
