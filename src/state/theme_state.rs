// ============================================================================
// THEME STATE - Preferencia claro/oscuro con persistencia
// ============================================================================
// Valor inicial = esquema del sistema (o claro). La preferencia guardada se
// lee de forma asíncrona y puede llegar después del primer render.
// Cada cambio se persiste en segundo plano sin bloquear el cambio visible.
// ============================================================================

use std::rc::Rc;
use futures::channel::oneshot;
use futures::task::{LocalSpawn, LocalSpawnExt};
use crate::models::ThemePreference;
use crate::state::reactivity::ReactiveState;
use crate::utils::constants::STORAGE_KEY_THEME;
use crate::utils::storage::{KeyValueStore, StorageError};

/// Señal de fin de persistencia (se puede ignorar)
pub type PersistSignal = oneshot::Receiver<Result<(), StorageError>>;

#[derive(Clone)]
pub struct ThemeState {
    theme: ReactiveState<ThemePreference>,
    platform: Option<ThemePreference>,
    store: Rc<dyn KeyValueStore>,
    spawner: Rc<dyn LocalSpawn>,
}

impl ThemeState {
    pub fn new(
        platform: Option<ThemePreference>,
        store: Rc<dyn KeyValueStore>,
        spawner: Rc<dyn LocalSpawn>,
    ) -> Self {
        Self {
            theme: ReactiveState::new(platform.unwrap_or_default()),
            platform,
            store,
            spawner,
        }
    }

    /// Aplica la preferencia guardada; si no hay, la del sistema
    pub async fn load_persisted(&self) -> ThemePreference {
        let stored = match self.store.get_item(STORAGE_KEY_THEME).await {
            Ok(value) => value.as_deref().and_then(ThemePreference::parse),
            Err(e) => {
                log::warn!("⚠️ [THEME] No se pudo leer la preferencia: {}", e);
                None
            }
        };

        if let Some(theme) = stored.or(self.platform) {
            log::info!("🎨 [THEME] Tema aplicado: {}", theme.as_str());
            self.theme.set(theme);
        }
        self.theme()
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.get()
    }

    pub fn is_dark(&self) -> bool {
        self.theme().is_dark()
    }

    /// Cambia el tema ya y lo persiste en segundo plano
    pub fn set_theme(&self, theme: ThemePreference) -> PersistSignal {
        self.theme.set(theme);

        let (done, signal) = oneshot::channel();
        let store = self.store.clone();
        let persist = async move {
            let result = store.set_item(STORAGE_KEY_THEME, theme.as_str()).await;
            if let Err(ref e) = result {
                log::warn!("⚠️ [THEME] No se pudo guardar el tema: {}", e);
            }
            let _ = done.send(result);
        };

        if let Err(e) = self.spawner.spawn_local(persist) {
            log::warn!("⚠️ [THEME] No se pudo programar el guardado: {}", e);
        }
        signal
    }

    pub fn toggle_theme(&self) -> PersistSignal {
        self.set_theme(self.theme().toggled())
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.theme.subscribe(callback);
    }
}

/// Esquema de color reportado por el navegador
#[cfg(target_arch = "wasm32")]
pub fn system_color_scheme() -> Option<ThemePreference> {
    let window = web_sys::window()?;
    let query = window.match_media("(prefers-color-scheme: dark)").ok()??;
    Some(if query.matches() { ThemePreference::Dark } else { ThemePreference::Light })
}
