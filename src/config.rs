use crate::utils::AppError;
use std::env;

/// Shared secret and expected claims for authenticated event deliveries
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub profiles_collection: String,
    pub webhook: Option<WebhookConfig>,
}

impl Config {
    /// Reads configuration from the process environment (after `dotenv`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "3002");
        let port = port
            .parse::<u16>()
            .map_err(|_| AppError::Config(format!("PORT must be a valid port number, got '{}'", port)))?;

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;

        let webhook = lookup("EVENT_WEBHOOK_SECRET")
            .filter(|secret| !secret.is_empty())
            .map(|secret| WebhookConfig {
                secret,
                issuer: var("EVENT_WEBHOOK_ISSUER", "auth-platform"),
                audience: var("EVENT_WEBHOOK_AUDIENCE", "profile-initializer"),
            });

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            database_url,
            profiles_collection: var("PROFILES_COLLECTION", "users"),
            webhook,
        })
    }
}
