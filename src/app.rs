// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Crea los servicios una sola vez, conecta los viewmodels al estado y
// re-renderiza el árbol completo cuando el estado notifica cambios.
// ============================================================================

use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::services::{AnswerClient, BrowserClipboard, FirebaseAuth, IdentityProvider};
use crate::state::{AppState, Subscription};
use crate::utils::ROOT_ELEMENT_ID;
use crate::viewmodels::{QueryViewModel, SessionViewModel};
use crate::views::render_app;

/// Lo que necesitan las vistas: estado + viewmodels
#[derive(Clone)]
pub struct AppContext {
    pub state: AppState,
    pub session_vm: SessionViewModel,
    pub query_vm: QueryViewModel,
}

impl AppContext {
    pub fn new(state: AppState, identity: Rc<dyn IdentityProvider>, answers: AnswerClient) -> Self {
        Self {
            session_vm: SessionViewModel::new(state.clone(), identity.clone()),
            query_vm: QueryViewModel::new(state.clone(), identity, answers, Rc::new(BrowserClipboard)),
            state,
        }
    }
}

/// Aplicación principal
pub struct App {
    ctx: AppContext,
    root: Element,
    render_listener: u64,
    _identity_subscription: Subscription,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(ROOT_ELEMENT_ID)
            .ok_or_else(|| JsValue::from_str(&format!("No #{} element found", ROOT_ELEMENT_ID)))?;

        let identity: Rc<dyn IdentityProvider> = Rc::new(FirebaseAuth::new(CONFIG.identity.clone()));
        let ctx = AppContext::new(AppState::new(), identity, AnswerClient::new());

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        let render_listener = ctx.state.subscribe_to_changes(move || {
            // Timeout 0 para batchear múltiples updates
            Timeout::new(0, crate::rerender_app).forget();
        });

        // El primer callback del proveedor saca la app de Loading
        let identity_subscription = ctx.session_vm.attach();

        Ok(Self {
            ctx,
            root,
            render_listener,
            _identity_subscription: identity_subscription,
        })
    }

    /// Renderizar aplicación (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        set_inner_html(&self.root, "");
        let view = render_app(&self.ctx)?;
        append_child(&self.root, &view)?;
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.ctx.state
    }
}

impl Drop for App {
    fn drop(&mut self) {
        log::info!("🧹 [APP] Liberando suscripciones");
        self.ctx.state.unsubscribe_from_changes(self.render_listener);
    }
}
