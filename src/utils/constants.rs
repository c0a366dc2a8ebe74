/// Prefijo de todas las claves de localStorage de la app
pub const STORAGE_PREFIX: &str = "clarify";

/// Registro de autenticación persistido (sobrevive a recargas)
pub const AUTH_STORAGE_KEY: &str = "auth_user";

/// Duración del aviso transitorio de "copiado"
pub const NOTICE_TIMEOUT_MS: u32 = 2_500;

/// Mensaje genérico cuando un fallo de consulta no trae texto propio
pub const QUERY_FALLBACK_MESSAGE: &str = "Failed to get response. Please try again.";

/// ID del elemento raíz en index.html
pub const ROOT_ELEMENT_ID: &str = "app";
