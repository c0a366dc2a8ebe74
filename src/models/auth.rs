use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sesión autenticada tal como la reporta el proveedor de identidad.
/// La UI solo la observa; nunca la crea ni la destruye.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Session {
    pub uid: String,
    pub email: Option<String>,
}

impl Session {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }

    /// Identificador visible del usuario (email)
    pub fn user_identifier(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        !self.uid.is_empty()
    }

    /// Iniciales para el avatar del header
    pub fn initials(&self) -> String {
        user_initials(self.email.as_deref())
    }
}

/// "jane.doe@x.com" -> "JD", "admin@x.com" -> "AD", sin email -> "U"
pub fn user_initials(email: Option<&str>) -> String {
    let Some(email) = email.filter(|e| !e.is_empty()) else {
        return "U".to_string();
    };

    let local = email.split('@').next().unwrap_or(email);
    let parts: Vec<&str> = local.split('.').collect();

    if parts.len() >= 2 {
        let first = parts[0].chars().next();
        let second = parts[1].chars().next();
        if let (Some(a), Some(b)) = (first, second) {
            return format!("{}{}", a, b).to_uppercase();
        }
    }

    email.chars().take(2).collect::<String>().to_uppercase()
}

/// Datos del formulario de login
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Validación "required" del formulario: ambos campos no vacíos
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// Rechazo del proveedor de identidad traducido a un mensaje para el usuario
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum LoginFailure {
    #[error("Invalid email or password. Please try again.")]
    InvalidCredential,
    #[error("No account found with this email.")]
    UserNotFound,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Too many failed attempts. Please try again later.")]
    TooManyRequests,
    /// Código no reconocido; se conserva para el log
    #[error("Login failed. Please try again.")]
    Other(String),
}

impl LoginFailure {
    /// Mapea los códigos `auth/*` del proveedor
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/invalid-credential" | "auth/wrong-password" => LoginFailure::InvalidCredential,
            "auth/user-not-found" => LoginFailure::UserNotFound,
            "auth/invalid-email" => LoginFailure::InvalidEmail,
            "auth/too-many-requests" => LoginFailure::TooManyRequests,
            other => LoginFailure::Other(other.to_string()),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            LoginFailure::InvalidCredential => "Invalid email or password. Please try again.",
            LoginFailure::UserNotFound => "No account found with this email.",
            LoginFailure::InvalidEmail => "Please enter a valid email address.",
            LoginFailure::TooManyRequests => "Too many failed attempts. Please try again later.",
            LoginFailure::Other(_) => "Login failed. Please try again.",
        }
    }
}
