// ============================================================================
// CONFIG - Configuración del cliente (tiempo de compilación)
// ============================================================================

use serde::{Deserialize, Serialize};
use crate::utils::constants::{DEFAULT_API_ORIGIN, DEFAULT_API_PREFIX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub api_origin: String,
    pub api_prefix: String,
    pub environment: String,
    pub enable_logging: bool,
    pub notification_poll_seconds: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_origin: DEFAULT_API_ORIGIN.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            notification_poll_seconds: 30,
        }
    }
}

impl ApiConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            api_origin: option_env!("API_ORIGIN")
                .unwrap_or(DEFAULT_API_ORIGIN).to_string(),
            api_prefix: option_env!("API_PREFIX")
                .unwrap_or(DEFAULT_API_PREFIX).to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            notification_poll_seconds: option_env!("NOTIFICATION_POLL_SECONDS")
                .unwrap_or("30").parse().unwrap_or(30),
        }
    }

    /// Config apuntando a otro origen, con el resto por defecto
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            api_origin: origin.into(),
            ..Self::default()
        }
    }

    /// Raíz de la API: origen + prefijo, con un único `/` entre ambos
    pub fn base_url(&self) -> String {
        let origin = self.api_origin.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            origin.to_string()
        } else {
            format!("{}/{}", origin, prefix)
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

// Configuración global estática (solo la leen los entry points del navegador)
lazy_static::lazy_static! {
    pub static ref CONFIG: ApiConfig = ApiConfig::from_env();
}
