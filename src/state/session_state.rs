// ============================================================================
// SESSION STATE - Usuario autenticado (loading → authenticated | anonymous)
// ============================================================================
// Único escritor de la sesión. Cualquier fallo del perfil deja la sesión
// vacía; el motivo queda en `last_failure` solo para diagnóstico.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use crate::models::Session;
use crate::services::{ApiClient, ApiError};
use crate::state::reactivity::ReactiveState;
use crate::utils::constants::ENDPOINT_PROFILE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Authenticated,
    Anonymous,
}

/// Motivo del último fetch de perfil fallido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFailure {
    /// 401 / 403
    Unauthenticated,
    /// Sin respuesta HTTP
    Unreachable,
    /// Otro status no-2xx
    Rejected { status: u16 },
    /// Respuesta sin registro de identidad válido
    InvalidProfile,
}

impl From<&ApiError> for SessionFailure {
    fn from(error: &ApiError) -> Self {
        match error {
            e if e.is_unauthorized() => SessionFailure::Unauthenticated,
            ApiError::Http { status, .. } => SessionFailure::Rejected { status: *status },
            ApiError::Transport(_) => SessionFailure::Unreachable,
            _ => SessionFailure::InvalidProfile,
        }
    }
}

#[derive(Clone)]
pub struct SessionState {
    client: ApiClient,
    session: ReactiveState<Option<Session>>,
    loading: ReactiveState<bool>,
    last_failure: Rc<Cell<Option<SessionFailure>>>,
}

impl SessionState {
    /// Arranca en `loading` hasta que termine el primer fetch
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            session: ReactiveState::new(None),
            loading: ReactiveState::new(true),
            last_failure: Rc::new(Cell::new(None)),
        }
    }

    /// Fetch inicial del perfil (al montar la app)
    pub async fn bootstrap(&self) -> Option<Session> {
        log::info!("🚀 [SESSION] Cargando perfil inicial...");
        self.fetch_profile().await
    }

    /// Repite el fetch. Llamadas concurrentes no se deduplican: gana la última en resolver.
    pub async fn refresh_profile(&self) -> Option<Session> {
        log::info!("🔄 [SESSION] Refrescando perfil...");
        self.fetch_profile().await
    }

    async fn fetch_profile(&self) -> Option<Session> {
        let outcome = match self.client.get(ENDPOINT_PROFILE, false).await {
            Ok(body) => Session::from_profile_response(&body).ok_or(SessionFailure::InvalidProfile),
            Err(e) => Err(SessionFailure::from(&e)),
        };

        let session = match outcome {
            Ok(session) => {
                log::info!("✅ [SESSION] Autenticado: {} ({})", session.email, session.role.as_str());
                self.last_failure.set(None);
                Some(session)
            }
            Err(failure) => {
                log::warn!("⚠️ [SESSION] Sin sesión: {:?}", failure);
                self.last_failure.set(Some(failure));
                None
            }
        };

        self.session.set(session.clone());
        if self.is_loading() {
            self.loading.set(false);
        }
        session
    }

    /// Limpia la sesión en memoria. El token guardado no se toca.
    pub fn logout(&self) {
        log::info!("👋 [SESSION] Logout");
        self.last_failure.set(None);
        self.session.set(None);
    }

    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Option::is_some)
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_loading() {
            SessionStatus::Loading
        } else if self.is_authenticated() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }

    pub fn last_failure(&self) -> Option<SessionFailure> {
        self.last_failure.get()
    }

    /// Notifica cambios de sesión y de loading
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback = Rc::new(callback);
        let on_loading = callback.clone();
        self.session.subscribe(move || callback());
        self.loading.subscribe(move || on_loading());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::services::TransportError;
    use crate::testing::{client_with, MockTransport};
    use crate::utils::constants::STORAGE_KEY_TOKEN;
    use crate::utils::storage::MemoryStore;
    use futures::executor::block_on;

    fn state(transport: MockTransport) -> (SessionState, Rc<MockTransport>) {
        let (client, transport, _) = client_with(transport, MemoryStore::with_item(STORAGE_KEY_TOKEN, "jwt"));
        (SessionState::new(client), transport)
    }

    const PROFILE: &str = r#"{"id": "u-1", "name": "Ana", "email": "ana@campus.edu", "role": "student"}"#;

    #[test]
    fn starts_loading() {
        let (session, _) = state(MockTransport::new());
        assert_eq!(session.status(), SessionStatus::Loading);
        assert!(session.session().is_none());
    }

    #[test]
    fn bootstrap_authenticates_with_token() {
        let (session, transport) = state(MockTransport::new().respond(200, PROFILE));
        let loaded = block_on(session.bootstrap()).unwrap();

        assert_eq!(loaded.role, Role::Student);
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.last_failure(), None);

        let sent = transport.last_request().unwrap();
        assert!(sent.url.ends_with("/api/users/me"));
        assert_eq!(sent.header("Authorization"), Some("Bearer jwt"));
    }

    #[test]
    fn failing_fetch_leaves_anonymous_and_not_loading() {
        let (session, _) = state(MockTransport::new().fail(TransportError::Network("offline".into())));
        assert!(block_on(session.bootstrap()).is_none());

        assert!(session.session().is_none());
        assert!(!session.is_loading());
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert_eq!(session.last_failure(), Some(SessionFailure::Unreachable));
    }

    #[test]
    fn failure_reasons_are_classified() {
        let (session, _) = state(
            MockTransport::new()
                .respond(401, r#"{"message": "jwt expired"}"#)
                .respond(500, "")
                .respond(200, r#"{"ok": true}"#),
        );

        block_on(session.bootstrap());
        assert_eq!(session.last_failure(), Some(SessionFailure::Unauthenticated));
        block_on(session.refresh_profile());
        assert_eq!(session.last_failure(), Some(SessionFailure::Rejected { status: 500 }));
        block_on(session.refresh_profile());
        assert_eq!(session.last_failure(), Some(SessionFailure::InvalidProfile));
        assert!(session.session().is_none());
    }

    #[test]
    fn refresh_replaces_session_wholesale() {
        let updated = r#"{"user": {"id": "u-1", "name": "Ana M.", "email": "ana@campus.edu", "role": "coordinator"}}"#;
        let (session, _) = state(MockTransport::new().respond(200, PROFILE).respond(200, updated));

        block_on(session.bootstrap());
        let refreshed = block_on(session.refresh_profile()).unwrap();
        assert_eq!(refreshed.name, "Ana M.");
        assert_eq!(session.session().unwrap().role, Role::Coordinator);
    }

    #[test]
    fn refresh_failure_clears_previous_session() {
        let (session, _) = state(MockTransport::new().respond(200, PROFILE).respond(401, "{}"));
        block_on(session.bootstrap());
        assert!(session.is_authenticated());
        block_on(session.refresh_profile());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_clears_memory_only() {
        let (session, transport) = state(MockTransport::new().respond(200, PROFILE));
        block_on(session.bootstrap());

        session.logout();
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn subscribers_see_session_and_loading_changes() {
        use std::cell::Cell;

        let (session, _) = state(MockTransport::new().respond(200, PROFILE));
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        session.subscribe(move || seen.set(seen.get() + 1));

        block_on(session.bootstrap());
        // sesión + loading
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn loading_flips_once_across_refreshes() {
        use std::cell::Cell;

        let (session, _) = state(
            MockTransport::new()
                .respond(200, PROFILE)
                .respond(200, PROFILE)
                .respond(401, "{}"),
        );
        let flips = Rc::new(Cell::new(0));
        let seen = flips.clone();
        session.loading.subscribe(move || seen.set(seen.get() + 1));

        block_on(session.bootstrap());
        block_on(session.refresh_profile());
        block_on(session.refresh_profile());
        assert_eq!(flips.get(), 1);
        assert!(!session.is_loading());
    }

    #[test]
    fn null_name_still_authenticates() {
        let profile = r#"{"id": "u-2", "name": null, "email": "leo@campus.edu", "role": "student"}"#;
        let (session, _) = state(MockTransport::new().respond(200, profile));

        let loaded = block_on(session.bootstrap()).unwrap();
        assert_eq!(loaded.name, "");
        assert_eq!(session.status(), SessionStatus::Authenticated);
    }
}
