// Fakes de las fronteras externas para tests nativos (sin navegador)

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use async_trait::async_trait;
use futures::channel::oneshot;
use crate::models::Session;
use crate::services::{Clipboard, HttpReply, HttpTransport, IdentityError, IdentityProvider, SessionListener};
use crate::state::{Subscribers, Subscription};

pub struct FakeIdentity {
    session: RefCell<Option<Session>>,
    listeners: Rc<Subscribers<Option<Session>>>,
    sign_in_error: RefCell<Option<IdentityError>>,
    credential_error: RefCell<Option<IdentityError>>,
    sign_out_error: RefCell<Option<IdentityError>>,
    revoke_on_credential: Cell<bool>,
    pub credential_calls: Cell<usize>,
    pub sign_in_calls: Cell<usize>,
    pub sign_out_calls: Cell<usize>,
}

impl FakeIdentity {
    fn with_session(session: Option<Session>) -> Self {
        Self {
            session: RefCell::new(session),
            listeners: Rc::new(Subscribers::new()),
            sign_in_error: RefCell::new(None),
            credential_error: RefCell::new(None),
            sign_out_error: RefCell::new(None),
            revoke_on_credential: Cell::new(false),
            credential_calls: Cell::new(0),
            sign_in_calls: Cell::new(0),
            sign_out_calls: Cell::new(0),
        }
    }

    pub fn signed_out() -> Self {
        Self::with_session(None)
    }

    pub fn signed_in(email: &str) -> Self {
        Self::with_session(Some(session_for(email)))
    }

    pub fn fail_sign_in(&self, code: &str) {
        *self.sign_in_error.borrow_mut() = Some(IdentityError::rejected(code, code));
    }

    pub fn fail_credential(&self, error: IdentityError) {
        *self.credential_error.borrow_mut() = Some(error);
    }

    /// El refresh del token es rechazado: el proveedor cierra la sesión y falla
    pub fn revoke_on_credential(&self) {
        self.revoke_on_credential.set(true);
    }

    pub fn fail_sign_out(&self, error: IdentityError) {
        *self.sign_out_error.borrow_mut() = Some(error);
    }

    /// Cambio de sesión originado en el proveedor (expiración, otra pestaña...)
    pub fn emit(&self, session: Option<Session>) {
        *self.session.borrow_mut() = session.clone();
        self.listeners.notify(&session);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

pub fn session_for(email: &str) -> Session {
    Session::new(format!("uid-{}", email), Some(email.to_string()))
}

#[async_trait(?Send)]
impl IdentityProvider for FakeIdentity {
    fn subscribe(&self, listener: SessionListener) -> Subscription {
        listener(&self.current_session());
        let id = self.listeners.subscribe(listener);
        Subscription::for_registry(&self.listeners, id)
    }

    fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, IdentityError> {
        self.sign_in_calls.set(self.sign_in_calls.get() + 1);
        if let Some(error) = self.sign_in_error.borrow().clone() {
            return Err(error);
        }
        let session = session_for(email);
        self.emit(Some(session.clone()));
        Ok(session)
    }

    async fn get_credential(&self, session: &Session) -> Result<String, IdentityError> {
        self.credential_calls.set(self.credential_calls.get() + 1);
        if self.revoke_on_credential.get() {
            self.emit(None);
            return Err(IdentityError::rejected("auth/user-token-expired", "TOKEN_EXPIRED"));
        }
        if let Some(error) = self.credential_error.borrow().clone() {
            return Err(error);
        }
        if self.current_session().as_ref() != Some(session) {
            return Err(IdentityError::NotAuthenticated);
        }
        Ok(format!("token-{}", self.credential_calls.get()))
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.sign_out_calls.set(self.sign_out_calls.get() + 1);
        if let Some(error) = self.sign_out_error.borrow().clone() {
            return Err(error);
        }
        if self.session.borrow().is_some() {
            self.emit(None);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub url: String,
    pub bearer: String,
    pub body: String,
}

/// Transporte con respuesta fija
pub struct FakeTransport {
    reply: Result<HttpReply, String>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(HttpReply {
                status,
                body: body.to_string(),
            }),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn post_json(&self, url: &str, bearer: &str, body: String) -> Result<HttpReply, String> {
        self.calls.borrow_mut().push(RecordedCall {
            url: url.to_string(),
            bearer: bearer.to_string(),
            body,
        });
        self.reply.clone()
    }
}

/// Transporte que no responde hasta que el test envía la respuesta
pub struct GatedTransport {
    pending: RefCell<Option<oneshot::Receiver<HttpReply>>>,
    pub call_count: Cell<usize>,
}

impl GatedTransport {
    pub fn new() -> (Self, oneshot::Sender<HttpReply>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                pending: RefCell::new(Some(rx)),
                call_count: Cell::new(0),
            },
            tx,
        )
    }
}

#[async_trait(?Send)]
impl HttpTransport for GatedTransport {
    async fn post_json(&self, _url: &str, _bearer: &str, _body: String) -> Result<HttpReply, String> {
        self.call_count.set(self.call_count.get() + 1);
        let receiver = self.pending.borrow_mut().take();
        match receiver {
            Some(rx) => rx.await.map_err(|_| "gate dropped".to_string()),
            None => Err("unexpected extra request".to_string()),
        }
    }
}

pub struct FakeClipboard {
    result: Result<(), String>,
    pub written: RefCell<Vec<String>>,
}

impl FakeClipboard {
    pub fn working() -> Self {
        Self {
            result: Ok(()),
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn broken(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            written: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        self.written.borrow_mut().push(text.to_string());
        self.result.clone()
    }
}
