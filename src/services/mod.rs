pub mod identity;
pub mod firebase_auth;
pub mod answer_client;
pub mod clipboard;

pub use identity::{IdentityError, IdentityProvider, SessionListener};
pub use firebase_auth::FirebaseAuth;
pub use answer_client::{AnswerClient, FetchTransport, HttpReply, HttpTransport, QueryError};
pub use clipboard::{BrowserClipboard, Clipboard};
