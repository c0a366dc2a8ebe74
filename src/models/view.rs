use serde::{Deserialize, Serialize};

/// Pantalla de nivel superior activa
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Login,
    App,
    Admin,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Login => "login",
            ViewType::App => "app",
            ViewType::Admin => "admin",
        }
    }
}
