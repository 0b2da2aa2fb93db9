use std::env;
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_VITALS_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_jwt_secret: String,
    pub port: u16,
    pub vitals_history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_jwt_secret: String::new(),
            port: DEFAULT_PORT,
            vitals_history_limit: DEFAULT_VITALS_HISTORY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            port: parse_var("PORT", DEFAULT_PORT),
            vitals_history_limit: match parse_var("VITALS_HISTORY_LIMIT", DEFAULT_VITALS_HISTORY_LIMIT) {
                0 => {
                    warn!("VITALS_HISTORY_LIMIT must be positive, using default");
                    DEFAULT_VITALS_HISTORY_LIMIT
                }
                limit => limit,
            },
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_jwt_secret.is_empty()
    }
}

fn parse_var<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
