// ============================================================================
// FIREBASE AUTH - Proveedor de identidad sobre la REST API de Identity Toolkit
// ============================================================================
// Solo comunicación HTTP + persistencia del usuario en localStorage.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use crate::config::IdentityConfig;
use crate::models::Session;
use crate::services::identity::{IdentityError, IdentityProvider, SessionListener};
use crate::state::{Subscribers, Subscription};
use crate::utils::{load_from_storage, remove_from_storage, save_to_storage, AUTH_STORAGE_KEY};

/// Usuario autenticado persistido
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
struct StoredAuth {
    uid: String,
    email: Option<String>,
    id_token: String,
    refresh_token: String,
    /// Unix seconds
    expires_at: i64,
}

impl StoredAuth {
    fn session(&self) -> Session {
        Session::new(self.uid.clone(), self.email.clone())
    }

    fn needs_refresh(&self, now: i64, margin_seconds: i64) -> bool {
        now + margin_seconds >= self.expires_at
    }
}

pub struct FirebaseAuth {
    config: IdentityConfig,
    current: RefCell<Option<StoredAuth>>,
    listeners: Rc<Subscribers<Option<Session>>>,
}

impl FirebaseAuth {
    /// Crea el proveedor restaurando el usuario guardado, si existe
    pub fn new(config: IdentityConfig) -> Self {
        if config.api_key.is_empty() {
            log::warn!("⚠️ [AUTH] FIREBASE_API_KEY vacío: el login fallará");
        }

        let restored = load_from_storage::<StoredAuth>(AUTH_STORAGE_KEY);
        if let Some(ref auth) = restored {
            log::info!("💾 [AUTH] Usuario restaurado desde storage: {}", auth.uid);
        }

        Self {
            config,
            current: RefCell::new(restored),
            listeners: Rc::new(Subscribers::new()),
        }
    }

    fn sign_in_url(&self) -> String {
        format!(
            "{}/accounts:signInWithPassword?key={}",
            self.config.identity_base_url, self.config.api_key
        )
    }

    fn refresh_url(&self) -> String {
        format!("{}/token?key={}", self.config.token_base_url, self.config.api_key)
    }

    /// Guardar (o borrar) el usuario y notificar si cambió la sesión
    fn set_current(&self, auth: Option<StoredAuth>) {
        let previous = self.current.replace(auth.clone());

        let persisted = match auth {
            Some(ref a) => save_to_storage(AUTH_STORAGE_KEY, a),
            None => remove_from_storage(AUTH_STORAGE_KEY),
        };
        if let Err(e) = persisted {
            log::error!("❌ [AUTH] Error persistiendo usuario: {}", e);
        }

        let previous_session = previous.map(|a| a.session());
        let next_session = auth.map(|a| a.session());
        if previous_session != next_session {
            self.listeners.notify(&next_session);
        }
    }

    async fn refresh(&self, auth: StoredAuth) -> Result<StoredAuth, IdentityError> {
        log::info!("🔄 [AUTH] Refrescando ID token de {}", auth.uid);

        let body = format!(
            "grant_type=refresh_token&refresh_token={}",
            String::from(js_sys::encode_uri_component(&auth.refresh_token))
        );
        let response = Request::post(&self.refresh_url())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| IdentityError::Network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if !response.ok() {
            let text = response.text().await.unwrap_or_default();
            return Err(rest_error(&text));
        }

        let refreshed = response
            .json::<RefreshResponse>()
            .await
            .map_err(|e| IdentityError::Network(format!("Parse error: {}", e)))?;

        Ok(StoredAuth {
            uid: auth.uid,
            email: auth.email,
            id_token: refreshed.id_token,
            refresh_token: refreshed.refresh_token,
            expires_at: expiry_from(&refreshed.expires_in),
        })
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseAuth {
    fn subscribe(&self, listener: SessionListener) -> Subscription {
        listener(&self.current_session());
        let id = self.listeners.subscribe(listener);
        Subscription::for_registry(&self.listeners, id)
    }

    fn current_session(&self) -> Option<Session> {
        self.current.borrow().as_ref().map(StoredAuth::session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        log::info!("🔐 [AUTH] Sign-in para {}", email);

        let request = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
            return_secure_token: true,
        };

        let response = Request::post(&self.sign_in_url())
            .json(&request)
            .map_err(|e| IdentityError::Network(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if !response.ok() {
            let text = response.text().await.unwrap_or_default();
            let error = rest_error(&text);
            log::warn!("⚠️ [AUTH] Sign-in rechazado: {}", error);
            return Err(error);
        }

        let signed_in = response
            .json::<SignInResponse>()
            .await
            .map_err(|e| IdentityError::Network(format!("Parse error: {}", e)))?;

        let auth = StoredAuth {
            uid: signed_in.local_id,
            email: signed_in.email.or_else(|| Some(email.to_string())),
            id_token: signed_in.id_token,
            refresh_token: signed_in.refresh_token,
            expires_at: expiry_from(&signed_in.expires_in),
        };
        let session = auth.session();
        self.set_current(Some(auth));

        log::info!("✅ [AUTH] Sign-in exitoso: {}", session.uid);
        Ok(session)
    }

    async fn get_credential(&self, session: &Session) -> Result<String, IdentityError> {
        let auth = self
            .current
            .borrow()
            .clone()
            .filter(|a| a.uid == session.uid)
            .ok_or(IdentityError::NotAuthenticated)?;

        let now = chrono::Utc::now().timestamp();
        if !auth.needs_refresh(now, self.config.token_refresh_margin_seconds) {
            return Ok(auth.id_token);
        }

        match self.refresh(auth).await {
            Ok(refreshed) => {
                // Pudo cerrarse la sesión mientras refrescábamos
                if self.current_session().as_ref() != Some(session) {
                    return Err(IdentityError::NotAuthenticated);
                }
                let token = refreshed.id_token.clone();
                self.set_current(Some(refreshed));
                Ok(token)
            }
            Err(e @ IdentityError::Rejected { .. }) => {
                // Refresh token revocado/expirado: la sesión ya no es válida
                log::warn!("⚠️ [AUTH] Refresh rechazado, cerrando sesión: {}", e);
                self.set_current(None);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        if self.current.borrow().is_none() {
            return Ok(());
        }
        log::info!("👋 [AUTH] Sign-out");
        self.set_current(None);
        Ok(())
    }
}

/// `expiresIn` llega como string de segundos
fn expiry_from(expires_in: &str) -> i64 {
    let seconds = expires_in.trim().parse::<i64>().unwrap_or(3600);
    chrono::Utc::now().timestamp() + seconds
}

/// Cuerpo de error REST -> `IdentityError::Rejected` con código estilo SDK
fn rest_error(body: &str) -> IdentityError {
    let message = serde_json::from_str::<RestErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_default();
    IdentityError::rejected(auth_code_for(&message), message)
}

/// "TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled..." -> "auth/too-many-requests"
fn auth_code_for(rest_message: &str) -> &'static str {
    let key = rest_message.split(" : ").next().unwrap_or("").trim();
    match key {
        "INVALID_PASSWORD" => "auth/wrong-password",
        "INVALID_LOGIN_CREDENTIALS" => "auth/invalid-credential",
        "EMAIL_NOT_FOUND" => "auth/user-not-found",
        "INVALID_EMAIL" | "MISSING_EMAIL" => "auth/invalid-email",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "auth/too-many-requests",
        "USER_DISABLED" => "auth/user-disabled",
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" => "auth/user-token-expired",
        "USER_NOT_FOUND" => "auth/user-not-found",
        _ => "auth/internal-error",
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest {
    email: String,
    password: String,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Deserialize)]
struct RestErrorEnvelope {
    error: RestError,
}

#[derive(Deserialize)]
struct RestError {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginFailure;

    #[test]
    fn test_rest_messages_map_to_login_table() {
        let cases = [
            ("INVALID_PASSWORD", "Invalid email or password. Please try again."),
            ("INVALID_LOGIN_CREDENTIALS", "Invalid email or password. Please try again."),
            ("EMAIL_NOT_FOUND", "No account found with this email."),
            ("INVALID_EMAIL", "Please enter a valid email address."),
            (
                "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled",
                "Too many failed attempts. Please try again later.",
            ),
            ("USER_DISABLED", "Login failed. Please try again."),
        ];
        for (rest, expected) in cases {
            assert_eq!(LoginFailure::from_code(auth_code_for(rest)).to_string(), expected, "{}", rest);
        }
    }

    #[test]
    fn test_rest_error_tolerates_garbage() {
        let error = rest_error("<html>502</html>");
        assert_eq!(error.code(), Some("auth/internal-error"));

        let error = rest_error(r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND"}}"#);
        assert_eq!(error.code(), Some("auth/user-not-found"));
    }

    #[test]
    fn test_needs_refresh_respects_margin() {
        let auth = StoredAuth {
            uid: "u".to_string(),
            email: None,
            id_token: "t".to_string(),
            refresh_token: "r".to_string(),
            expires_at: 1_000,
        };
        assert!(!auth.needs_refresh(600, 300));
        assert!(auth.needs_refresh(700, 300));
        assert!(auth.needs_refresh(1_200, 0));
    }
}
