use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub answer_service_url: String,
    pub identity: IdentityConfig,
    pub environment: String,
    pub enable_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub api_key: String,
    pub identity_base_url: String,
    pub token_base_url: String,
    /// Un ID token más cerca que esto de su expiración se refresca
    pub token_refresh_margin_seconds: i64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_string(),
            token_base_url: DEFAULT_TOKEN_BASE_URL.to_string(),
            token_refresh_margin_seconds: 300,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            answer_service_url: DEFAULT_ANSWER_SERVICE_URL.to_string(),
            identity: IdentityConfig::default(),
            environment: "development".to_string(),
            enable_logging: true,
        }
    }
}

const DEFAULT_ANSWER_SERVICE_URL: &str = "https://cryocord-sales-query-1034418228298.us-central1.run.app";
const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com/v1";

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            answer_service_url: option_env!("ANSWER_SERVICE_URL")
                .unwrap_or(DEFAULT_ANSWER_SERVICE_URL).to_string(),
            identity: IdentityConfig {
                api_key: option_env!("FIREBASE_API_KEY")
                    .unwrap_or("").to_string(),
                identity_base_url: option_env!("IDENTITY_BASE_URL")
                    .unwrap_or(DEFAULT_IDENTITY_BASE_URL).to_string(),
                token_base_url: option_env!("TOKEN_BASE_URL")
                    .unwrap_or(DEFAULT_TOKEN_BASE_URL).to_string(),
                token_refresh_margin_seconds: option_env!("TOKEN_REFRESH_MARGIN_SECONDS")
                    .unwrap_or("300").parse().unwrap_or(300),
            },
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
        }
    }

    /// Nivel de log para wasm-logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_to_hosted_endpoints() {
        let config = AppConfig::default();
        assert!(config.answer_service_url.starts_with("https://"));
        assert_eq!(config.identity.token_refresh_margin_seconds, 300);
        assert!(!config.is_production());
    }

    #[test]
    fn test_log_level_follows_flag() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), log::Level::Info);
        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Warn);
    }
}
