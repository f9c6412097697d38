use thiserror::Error;
use crate::utils::storage::StorageError;

/// Fallo a nivel de red (el request no obtuvo respuesta HTTP)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Respuesta no-2xx; `message` viene del cuerpo (`message` / `error`)
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Parse error: {0}")]
    Decode(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 / 403
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
