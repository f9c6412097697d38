// ============================================================================
// ACTIVITY CLIENT - NÚCLEO DEL FRONTEND (RUST PURO)
// ============================================================================
// - Services: SOLO comunicación API (cliente HTTP, auth, estadísticas)
// - State: State Management con Rc<RefCell> (sesión, tema, app)
// - Models: Estructuras compartidas con backend
// - Utils: constantes y almacenamiento local
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod testing;

pub use config::{ApiConfig, CONFIG};
pub use models::{AggregateStats, Role, RoleDistribution, Session, ThemePreference, UserRecord};
pub use services::{ApiClient, ApiError, AuthService, NotificationService, RequestOptions, UserService};
pub use state::{AppState, SessionState, SessionStatus, ThemeState};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point WASM: panic hook + logging
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if CONFIG.enable_logging {
        let level = if CONFIG.is_production() { log::Level::Info } else { log::Level::Debug };
        wasm_logger::init(wasm_logger::Config::new(level));
    }
    log::info!("🚀 Activity client - API {}", CONFIG.base_url());
}

/// Crea el estado del navegador y lanza el montaje (perfil + tema) en segundo plano
#[cfg(target_arch = "wasm32")]
pub fn launch() -> AppState {
    let state = AppState::for_browser();
    let mounting = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        mounting.mount().await;
    });
    state
}
