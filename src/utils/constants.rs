/// Origen del backend por defecto (desarrollo)
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:3000";

/// Prefijo común de todos los endpoints
pub const DEFAULT_API_PREFIX: &str = "/api";

// Claves de almacenamiento local (cada una tiene un único dueño)
pub const STORAGE_KEY_TOKEN: &str = "user_token";
pub const STORAGE_KEY_THEME: &str = "user-theme";

// Endpoints
pub const ENDPOINT_PROFILE: &str = "/users/me";
pub const ENDPOINT_USERS: &str = "/users";
pub const ENDPOINT_NOTIFICATIONS: &str = "/notifications";
pub const ENDPOINT_LOGIN: &str = "/auth/login";
pub const ENDPOINT_REGISTER: &str = "/auth/register";

/// Mensaje genérico cuando el backend no explica el fallo
pub const GENERIC_ERROR_MESSAGE: &str = "Request failed";
