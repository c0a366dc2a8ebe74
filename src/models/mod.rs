pub mod auth;
pub mod query;
pub mod view;

pub use auth::{LoginFailure, LoginRequest, Session};
pub use query::{AnswerRequest, AnswerResponse, ErrorBody, QueryResult};
pub use view::ViewType;
