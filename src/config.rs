use std::net::SocketAddr;

use url::Url;

use crate::error::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite://test_datas.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct WebhookConfig {
    pub url: Url,
    pub addr: SocketAddr,
}

/// Process settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub token: String,
    /// `None` leaves the bot without an administrator.
    pub admin_id: Option<i64>,
    pub database_url: String,
    pub max_connections: u32,
    pub log_level: String,
    pub webhook: Option<WebhookConfig>,
    pub welcome_photo: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let token = var("TELOXIDE_TOKEN")
            .or_else(|| var("BOT_TOKEN"))
            .ok_or(ConfigError::Missing("TELOXIDE_TOKEN"))?;

        let admin_id = var("ADMIN_ID")
            .map(|value| parse("ADMIN_ID", value))
            .transpose()?;

        let max_connections = var("DATABASE_MAX_CONNECTIONS")
            .map(|value| parse("DATABASE_MAX_CONNECTIONS", value))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let webhook = match (var("WEBHOOK_URL"), var("WEBHOOK_ADDR")) {
            (Some(url), Some(addr)) => Some(WebhookConfig {
                url: parse("WEBHOOK_URL", url)?,
                addr: parse("WEBHOOK_ADDR", addr)?,
            }),
            _ => None,
        };

        Ok(Self {
            token,
            admin_id,
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            max_connections,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
            webhook,
            welcome_photo: var("WELCOME_PHOTO"),
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
