// ============================================================================
// IDENTITY - Frontera con el proveedor de identidad (colaborador externo)
// ============================================================================
// Se construye una vez al arrancar y se inyecta por referencia (Rc<dyn ...>)
// en la máquina de sesión y en el controlador de consultas.
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;
use crate::models::Session;
use crate::state::Subscription;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// No hay sesión activa
    #[error("User not authenticated")]
    NotAuthenticated,
    /// Rechazo codificado del proveedor (`auth/wrong-password`, ...)
    #[error("{code}: {message}")]
    Rejected { code: String, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl IdentityError {
    pub fn rejected(code: &str, message: impl Into<String>) -> Self {
        IdentityError::Rejected {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Código `auth/*` si lo hay
    pub fn code(&self) -> Option<&str> {
        match self {
            IdentityError::Rejected { code, .. } => Some(code.as_str()),
            IdentityError::NotAuthenticated => Some("auth/no-current-user"),
            IdentityError::Network(_) => Some("auth/network-request-failed"),
            IdentityError::Storage(_) => None,
        }
    }
}

/// Listener de cambios de sesión
pub type SessionListener = Box<dyn Fn(&Option<Session>)>;

/// Contrato que la app consume del proveedor de identidad
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Registra el listener, lo invoca de inmediato con la sesión actual y luego en
    /// cada sign-in/sign-out. Soltar la `Subscription` lo desregistra.
    fn subscribe(&self, listener: SessionListener) -> Subscription;

    fn current_session(&self) -> Option<Session>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    /// Bearer de vida corta. Falla con `NotAuthenticated` si la sesión ya no está activa.
    async fn get_credential(&self, session: &Session) -> Result<String, IdentityError>;

    /// Idempotente
    async fn sign_out(&self) -> Result<(), IdentityError>;
}
