// ============================================================================
// SESSION VIEWMODEL - Login, logout y navegación entre vistas
// ============================================================================
// Conecta el proveedor de identidad con la máquina de estados de sesión.
// Los errores se convierten en texto para la UI; nada se propaga más allá.
// ============================================================================

use std::rc::Rc;
use crate::models::{LoginFailure, LoginRequest, Session};
use crate::services::IdentityProvider;
use crate::state::{AppState, Subscription};

#[derive(Clone)]
pub struct SessionViewModel {
    state: AppState,
    identity: Rc<dyn IdentityProvider>,
}

impl SessionViewModel {
    pub fn new(state: AppState, identity: Rc<dyn IdentityProvider>) -> Self {
        Self { state, identity }
    }

    /// Suscribirse al proveedor. El primer callback (inmediato) saca la fase de
    /// Loading. La suscripción se libera al soltar el guard devuelto.
    pub fn attach(&self) -> Subscription {
        let state = self.state.clone();
        self.identity.subscribe(Box::new(move |session: &Option<Session>| {
            let was_logged_in = state.session.get_session().is_some();
            let changed = state
                .session
                .transition(|phase| phase.on_session_changed(session.clone()));

            if session.is_none() && was_logged_in {
                log::info!("🚪 [SESSION] Sesión cerrada, limpiando estado");
                state.clear_session_bound_state();
            }
            if changed {
                state.notify_subscribers();
            }
        }))
    }

    /// Delegar la verificación al proveedor y traducir su rechazo
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, LoginFailure> {
        self.identity
            .sign_in(email, password)
            .await
            .map_err(|e| {
                log::error!("❌ [LOGIN] {}", e);
                LoginFailure::from_code(e.code().unwrap_or("auth/internal-error"))
            })
    }

    /// Envío del formulario: valida, aplica el guard single-flight y publica el resultado
    pub async fn submit_login(&self) {
        let auth = &self.state.auth;
        let request = LoginRequest::new(auth.get_email(), auth.get_password());

        if !request.is_complete() {
            log::debug!("[LOGIN] Formulario incompleto, no se envía");
            return;
        }
        if !auth.begin_attempt() {
            log::debug!("[LOGIN] Ya hay un intento en curso");
            return;
        }
        self.state.notify_subscribers();

        match self.login(request.email.trim(), &request.password).await {
            Ok(session) => {
                log::info!("✅ [LOGIN] Login exitoso: {}", session.uid);
                auth.finish_attempt(None);
                auth.set_password(String::new());
                // No esperamos al callback del proveedor para mostrar la app
                self.state
                    .session
                    .transition(|phase| phase.on_login_succeeded(session));
            }
            Err(failure) => {
                auth.finish_attempt(Some(failure.to_string()));
            }
        }
        self.state.notify_subscribers();
    }

    /// Cerrar sesión. El cambio de vista llega por el callback del proveedor.
    pub async fn logout(&self) {
        if let Err(e) = self.identity.sign_out().await {
            log::error!("❌ [SESSION] Error en logout: {}", e);
        }
    }

    pub fn switch_to_admin(&self) {
        if self.state.session.transition(|phase| phase.switch_to_admin()) {
            self.state.notify_subscribers();
        }
    }

    pub fn switch_to_app(&self) {
        if self.state.session.transition(|phase| phase.switch_to_app()) {
            self.state.notify_subscribers();
        }
    }
}
