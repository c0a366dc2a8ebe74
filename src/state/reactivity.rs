// ============================================================================
// REACTIVITY - Registro de subscribers con desuscripción explícita
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

/// Lista de callbacks notificados en orden de registro
pub struct Subscribers<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Registrar callback; devuelve el id para `unsubscribe`
    pub fn subscribe<F>(&self, callback: F) -> u64
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Quitar callback. Devuelve false si ya no estaba registrado.
    pub fn unsubscribe(&self, id: u64) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Notificar a todos los subscribers.
    /// Se itera sobre una copia: un callback puede (des)suscribirse sin pánico de RefCell.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard de una suscripción: al soltarse libera el listener exactamente una vez
#[must_use = "soltar la Subscription cancela la suscripción"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Suscripción a un `Subscribers` compartido; no lo mantiene vivo
    pub fn for_registry<T: 'static>(registry: &Rc<Subscribers<T>>, id: u64) -> Self {
        let weak: Weak<Subscribers<T>> = Rc::downgrade(registry);
        Self::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.unsubscribe(id);
            }
        })
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}
