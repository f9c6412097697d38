// ============================================================================
// AUTH SERVICE - Dueño del token guardado (`user_token`)
// ============================================================================

use std::rc::Rc;
use serde::Serialize;
use serde_json::{json, Value};
use crate::models::Role;
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use crate::utils::constants::{ENDPOINT_LOGIN, ENDPOINT_REGISTER, STORAGE_KEY_TOKEN};
use crate::utils::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    store: Rc<dyn KeyValueStore>,
}

impl AuthService {
    pub fn new(client: ApiClient, store: Rc<dyn KeyValueStore>) -> Self {
        Self { client, store }
    }

    /// Login público; guarda el token devuelto
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, ApiError> {
        log::info!("🔐 [AUTH] Iniciando sesión: {}", email);

        let response = self.client
            .post(ENDPOINT_LOGIN, json!({ "email": email, "password": password }), true)
            .await?;

        let token = extract_token(&response)
            .ok_or_else(|| ApiError::Decode("login response without token".to_string()))?;

        self.store.set_item(STORAGE_KEY_TOKEN, &token).await?;
        log::info!("✅ [AUTH] Token guardado");
        Ok(token)
    }

    /// Registro público
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        log::info!("📝 [AUTH] Registro: {} ({})", request.email, request.role.as_str());
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.client.post(ENDPOINT_REGISTER, body, true).await
    }

    /// Borra el token guardado. No avisa al servidor.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.store.remove_item(STORAGE_KEY_TOKEN).await?;
        log::info!("👋 [AUTH] Token eliminado");
        Ok(())
    }

    pub async fn has_token(&self) -> bool {
        matches!(self.store.get_item(STORAGE_KEY_TOKEN).await, Ok(Some(t)) if !t.is_empty())
    }
}

/// `token` / `accessToken` / `access_token`, directo o bajo `data`
fn extract_token(response: &Value) -> Option<String> {
    let scopes = [Some(response), response.get("data")];
    scopes
        .iter()
        .flatten()
        .flat_map(|scope| ["token", "accessToken", "access_token"].map(|key| scope.get(key)))
        .flatten()
        .find_map(|v| v.as_str().filter(|s| !s.is_empty()).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_with, MockTransport};
    use crate::utils::storage::MemoryStore;
    use futures::executor::block_on;

    fn service(transport: MockTransport, store: MemoryStore) -> (AuthService, Rc<MockTransport>, Rc<MemoryStore>) {
        let (client, transport, store) = client_with(transport, store);
        (AuthService::new(client, store.clone()), transport, store)
    }

    #[test]
    fn sign_in_is_public_and_stores_token() {
        let transport = MockTransport::new().respond(200, r#"{"accessToken": "jwt-1"}"#);
        let (auth, transport, store) = service(transport, MemoryStore::with_item(STORAGE_KEY_TOKEN, "stale"));

        let token = block_on(auth.sign_in("ana@campus.edu", "secret")).unwrap();
        assert_eq!(token, "jwt-1");
        assert_eq!(store.peek(STORAGE_KEY_TOKEN).as_deref(), Some("jwt-1"));
        assert_eq!(transport.last_request().unwrap().header("Authorization"), None);
    }

    #[test]
    fn token_nested_under_data() {
        let transport = MockTransport::new().respond(200, r#"{"data": {"token": "jwt-2"}}"#);
        let (auth, _, _) = service(transport, MemoryStore::new());
        assert_eq!(block_on(auth.sign_in("a", "b")).unwrap(), "jwt-2");
    }

    #[test]
    fn missing_token_is_a_decode_error() {
        let transport = MockTransport::new().respond(200, r#"{"ok": true}"#);
        let (auth, _, store) = service(transport, MemoryStore::new());
        let err = block_on(auth.sign_in("a", "b")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn failed_login_surfaces_backend_message() {
        let transport = MockTransport::new().respond(401, r#"{"message": "Credenciales inválidas"}"#);
        let (auth, _, _) = service(transport, MemoryStore::new());
        let err = block_on(auth.sign_in("a", "b")).unwrap_err();
        assert_eq!(err.message(), "Credenciales inválidas");
    }

    #[test]
    fn sign_out_removes_token() {
        let (auth, _, store) = service(MockTransport::new(), MemoryStore::with_item(STORAGE_KEY_TOKEN, "jwt"));
        assert!(block_on(auth.has_token()));
        block_on(auth.sign_out()).unwrap();
        assert!(!block_on(auth.has_token()));
        assert_eq!(store.peek(STORAGE_KEY_TOKEN), None);
    }

    #[test]
    fn register_sends_role_lowercase() {
        let transport = MockTransport::new().respond(201, r#"{"id": 3}"#);
        let (auth, transport, _) = service(transport, MemoryStore::new());
        let request = RegisterRequest {
            name: "Leo".into(),
            email: "leo@campus.edu".into(),
            password: "pw".into(),
            role: Role::Coordinator,
        };
        block_on(auth.register(&request)).unwrap();
        let sent = transport.last_request().unwrap();
        match sent.body {
            Some(crate::services::http::RequestBody::Json(text)) => assert!(text.contains(r#""role":"coordinator""#)),
            other => panic!("unexpected body: {:?}", other),
        }
    }
}
