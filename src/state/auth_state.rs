// ============================================================================
// AUTH STATE - Estado del formulario de login
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Estado local del formulario de login
#[derive(Clone)]
pub struct AuthState {
    pub email: Rc<RefCell<String>>,
    pub password: Rc<RefCell<String>>,
    pub busy: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            email: Rc::new(RefCell::new(String::new())),
            password: Rc::new(RefCell::new(String::new())),
            busy: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_email(&self, email: String) {
        *self.email.borrow_mut() = email;
    }

    pub fn get_email(&self) -> String {
        self.email.borrow().clone()
    }

    pub fn set_password(&self, password: String) {
        *self.password.borrow_mut() = password;
    }

    pub fn get_password(&self) -> String {
        self.password.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Guard single-flight: marca busy y limpia el error previo.
    /// Devuelve false si ya había un intento en curso.
    pub fn begin_attempt(&self) -> bool {
        let mut busy = self.busy.borrow_mut();
        if *busy {
            return false;
        }
        *busy = true;
        *self.error.borrow_mut() = None;
        true
    }

    pub fn finish_attempt(&self, error: Option<String>) {
        *self.busy.borrow_mut() = false;
        *self.error.borrow_mut() = error;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    /// Limpiar todo (tras logout)
    pub fn reset(&self) {
        self.set_email(String::new());
        self.set_password(String::new());
        *self.busy.borrow_mut() = false;
        *self.error.borrow_mut() = None;
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}
