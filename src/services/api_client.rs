// ============================================================================
// API CLIENT - Punto único de salida hacia el backend
// ============================================================================
// Construye la URL, codifica el cuerpo, inyecta el Bearer token y normaliza
// los errores. Sin reintentos ni timeouts: la política de fallo es del caller.
// ============================================================================

use std::rc::Rc;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use crate::config::ApiConfig;
use crate::services::error::ApiError;
use crate::services::http::{HttpRequest, HttpTransport, Method, MultipartForm, RequestBody};
use crate::utils::constants::{GENERIC_ERROR_MESSAGE, STORAGE_KEY_TOKEN};
use crate::utils::storage::KeyValueStore;

/// Cuerpo sin codificar: valor JSON o multipart (pasa intacto)
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartForm),
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<MultipartForm> for Payload {
    fn from(form: MultipartForm) -> Self {
        Payload::Multipart(form)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Payload>,
    pub headers: Vec<(String, String)>,
    /// No adjuntar credenciales (login, registro)
    pub is_public: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            body: None,
            headers: Vec::new(),
            is_public: false,
        }
    }
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    pub fn body(mut self, body: impl Into<Payload>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Cliente API (sin estado propio más allá de sus colaboradores)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    store: Rc<dyn KeyValueStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, transport: Rc<dyn HttpTransport>, store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            base_url: config.base_url(),
            transport,
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL absoluta: base + endpoint (se añade `/` si falta)
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Request genérico. Devuelve el cuerpo JSON (o `{}` si no es JSON).
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = self.url_for(endpoint);
        let method = options.method;

        match self.dispatch(url.clone(), options).await {
            Ok(data) => Ok(data),
            Err(e) => {
                log::error!("❌ [API] {} {} falló: {}", method, url, e);
                Err(e)
            }
        }
    }

    async fn dispatch(&self, url: String, options: RequestOptions) -> Result<Value, ApiError> {
        let mut headers = Vec::new();

        let body = match options.body {
            Some(Payload::Json(value)) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                let text = serde_json::to_string(&value)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                Some(RequestBody::Json(text))
            }
            Some(Payload::Multipart(form)) => Some(RequestBody::Multipart(form)),
            None => None,
        };

        headers.extend(options.headers);

        if !options.is_public {
            if let Some(token) = self.stored_token().await {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }

        let request = HttpRequest {
            method: options.method,
            url,
            headers,
            body,
        };

        let response = self.transport.send(request).await?;
        let data = parse_body(&response.body);

        if !response.ok() {
            return Err(ApiError::Http {
                status: response.status,
                message: error_message(&data),
            });
        }

        Ok(data)
    }

    /// Token guardado; un fallo de lectura cuenta como "sin token"
    async fn stored_token(&self) -> Option<String> {
        match self.store.get_item(STORAGE_KEY_TOKEN).await {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                log::warn!("⚠️ [API] No se pudo leer el token: {}", e);
                None
            }
        }
    }

    pub async fn get(&self, endpoint: &str, is_public: bool) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::method(Method::Get).public(is_public)).await
    }

    pub async fn post(&self, endpoint: &str, body: impl Into<Payload>, is_public: bool) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::method(Method::Post).body(body).public(is_public)).await
    }

    pub async fn put(&self, endpoint: &str, body: impl Into<Payload>) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::method(Method::Put).body(body)).await
    }

    pub async fn patch(&self, endpoint: &str, body: impl Into<Payload>) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::method(Method::Patch).body(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::method(Method::Delete)).await
    }

    /// GET + deserialización tipada
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, is_public: bool) -> Result<T, ApiError> {
        let data = self.get(endpoint, is_public).await?;
        decode(data)
    }
}

pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Cuerpo vacío o no-JSON => objeto vacío
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// `message` o `error` del cuerpo (primer elemento si es array)
fn error_message(data: &Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| data.get(*key))
        .find_map(|field| match field {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}
