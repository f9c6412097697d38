// ============================================================================
// APP STATE - Contenedor explícito de todo el estado de la aplicación
// ============================================================================
// Se crea una vez al arrancar y se pasa a quien lo necesite. No hay singleton.
// ============================================================================

use std::rc::Rc;
use futures::task::LocalSpawn;
use crate::config::ApiConfig;
use crate::models::{Session, ThemePreference};
use crate::services::{ApiClient, ApiError, AuthService, HttpTransport, NotificationService, UserService};
use crate::state::{SessionState, ThemeState};
use crate::utils::storage::KeyValueStore;

#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub client: ApiClient,
    pub auth: AuthService,
    pub session: SessionState,
    pub theme: ThemeState,
    pub users: UserService,
    pub notifications: NotificationService,
}

impl AppState {
    /// Crear estado de aplicación con sus colaboradores
    pub fn new(
        config: ApiConfig,
        transport: Rc<dyn HttpTransport>,
        store: Rc<dyn KeyValueStore>,
        spawner: Rc<dyn LocalSpawn>,
        platform_theme: Option<ThemePreference>,
    ) -> Self {
        let client = ApiClient::new(&config, transport, store.clone());

        Self {
            auth: AuthService::new(client.clone(), store.clone()),
            session: SessionState::new(client.clone()),
            theme: ThemeState::new(platform_theme, store, spawner),
            users: UserService::new(Rc::new(client.clone())),
            notifications: NotificationService::new(client.clone()),
            client,
            config,
        }
    }

    /// Estado cableado al navegador: fetch, localStorage, event loop y `matchMedia`
    #[cfg(target_arch = "wasm32")]
    pub fn for_browser() -> Self {
        use crate::services::GlooTransport;
        use crate::state::theme_state::system_color_scheme;
        use crate::utils::{BrowserSpawner, LocalStorageStore};

        Self::new(
            crate::config::CONFIG.clone(),
            Rc::new(GlooTransport),
            Rc::new(LocalStorageStore),
            Rc::new(BrowserSpawner),
            system_color_scheme(),
        )
    }

    /// Al montar: perfil y preferencia de tema en paralelo
    pub async fn mount(&self) {
        futures::join!(self.session.bootstrap(), self.theme.load_persisted());
    }

    /// Login + recarga del perfil
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, ApiError> {
        self.auth.sign_in(email, password).await?;
        Ok(self.session.refresh_profile().await)
    }

    /// Limpia la sesión en memoria y borra el token guardado
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.session.logout();
        self.auth.sign_out().await
    }
}
