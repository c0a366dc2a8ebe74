// ============================================================================
// SESSION STATE - Máquina de estados sesión/vista
// ============================================================================
// Loading -> LoggedOut | LoggedIn{App}
// LoggedOut -> LoggedIn{App}            (login exitoso / callback con sesión)
// LoggedIn{App} <-> LoggedIn{Admin}     (navegación local)
// * -> LoggedOut                        (callback con sesión = None)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::{Session, ViewType};

/// Vista dentro de una sesión iniciada
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppView {
    App,
    Admin,
}

#[derive(Clone, PartialEq, Debug)]
pub enum SessionPhase {
    /// Esperando el primer callback del proveedor de identidad
    Loading,
    LoggedOut,
    LoggedIn { session: Session, view: AppView },
}

/// Pantalla a renderizar (función pura de la fase)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    Loading,
    Login,
    MainApp,
    Admin,
}

impl SessionPhase {
    pub fn screen(&self) -> Screen {
        match self {
            SessionPhase::Loading => Screen::Loading,
            SessionPhase::LoggedOut => Screen::Login,
            SessionPhase::LoggedIn { view: AppView::App, .. } => Screen::MainApp,
            SessionPhase::LoggedIn { view: AppView::Admin, .. } => Screen::Admin,
        }
    }

    pub fn current_view(&self) -> ViewType {
        match self {
            SessionPhase::Loading | SessionPhase::LoggedOut => ViewType::Login,
            SessionPhase::LoggedIn { view: AppView::App, .. } => ViewType::App,
            SessionPhase::LoggedIn { view: AppView::Admin, .. } => ViewType::Admin,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionPhase::LoggedIn { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionPhase::Loading)
    }

    /// Callback del proveedor. Una sesión nula fuerza LoggedOut desde cualquier fase
    /// y descarta la vista recordada.
    pub fn on_session_changed(&mut self, session: Option<Session>) -> bool {
        let next = match (&*self, session) {
            (_, None) => SessionPhase::LoggedOut,
            (SessionPhase::LoggedIn { session: current, view }, Some(session)) if current.uid == session.uid => {
                SessionPhase::LoggedIn { session, view: *view }
            }
            (_, Some(session)) => SessionPhase::LoggedIn {
                session,
                view: AppView::App,
            },
        };
        self.replace(next)
    }

    /// Señal síncrona de login exitoso: entra directo a `App` sin esperar el callback
    pub fn on_login_succeeded(&mut self, session: Session) -> bool {
        match self {
            SessionPhase::LoggedOut => self.replace(SessionPhase::LoggedIn {
                session,
                view: AppView::App,
            }),
            // Loading solo lo abandona el primer callback; en LoggedIn ya hay sesión
            _ => false,
        }
    }

    pub fn switch_to_admin(&mut self) -> bool {
        self.set_view(AppView::Admin)
    }

    pub fn switch_to_app(&mut self) -> bool {
        self.set_view(AppView::App)
    }

    fn set_view(&mut self, target: AppView) -> bool {
        match self {
            SessionPhase::LoggedIn { view, .. } if *view != target => {
                *view = target;
                true
            }
            _ => false,
        }
    }

    fn replace(&mut self, next: SessionPhase) -> bool {
        if *self == next {
            return false;
        }
        *self = next;
        true
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Loading
    }
}

/// Handle compartido de la máquina de estados
#[derive(Clone)]
pub struct SessionState {
    phase: Rc<RefCell<SessionPhase>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: Rc::new(RefCell::new(SessionPhase::Loading)),
        }
    }

    /// Copia de la fase actual
    pub fn phase(&self) -> SessionPhase {
        self.phase.borrow().clone()
    }

    pub fn screen(&self) -> Screen {
        self.phase.borrow().screen()
    }

    pub fn current_view(&self) -> ViewType {
        self.phase.borrow().current_view()
    }

    pub fn get_session(&self) -> Option<Session> {
        self.phase.borrow().session().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.phase.borrow().is_loading()
    }

    /// Aplicar una transición; devuelve si la fase cambió
    pub fn transition<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut SessionPhase) -> bool,
    {
        let mut phase = self.phase.borrow_mut();
        let from = phase.current_view();
        let changed = f(&mut phase);
        if changed {
            log::info!("🔀 [SESSION] {} -> {}", from.as_str(), phase.current_view().as_str());
        }
        changed
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
