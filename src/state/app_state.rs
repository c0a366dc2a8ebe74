// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::state::{AuthState, QueryStore, SessionState, Subscribers};

/// Estado global de la aplicación (clonable: todo vive en Rc)
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub auth: AuthState,
    pub query: QueryStore,

    // UI State (panel admin)
    pub admin_dragging: Rc<RefCell<bool>>,

    // Reactivity: callbacks para re-renderizar cuando cambia algo
    change_subscribers: Rc<Subscribers<()>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            auth: AuthState::new(),
            query: QueryStore::new(),
            admin_dragging: Rc::new(RefCell::new(false)),
            change_subscribers: Rc::new(Subscribers::new()),
        }
    }

    /// Suscribirse a cambios de estado; devuelve el id del listener
    pub fn subscribe_to_changes<F>(&self, callback: F) -> u64
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.subscribe(move |_| callback())
    }

    pub fn unsubscribe_from_changes(&self, id: u64) -> bool {
        self.change_subscribers.unsubscribe(id)
    }

    /// Notificar a todos los subscribers de cambios
    pub fn notify_subscribers(&self) {
        self.change_subscribers.notify(&());
    }

    pub fn set_admin_dragging(&self, dragging: bool) -> bool {
        let mut current = self.admin_dragging.borrow_mut();
        if *current == dragging {
            return false;
        }
        *current = dragging;
        true
    }

    /// Limpiar el estado atado a la sesión (tras sign-out)
    pub fn clear_session_bound_state(&self) {
        self.query.reset();
        self.auth.reset();
        *self.admin_dragging.borrow_mut() = false;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
