use serde::Deserialize;

use wayfinder_auth_types::token::DEFAULT_ACCESS_TOKEN_TTL_SECS;
use wayfinder_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC key for access tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3200). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    #[serde(default = "default_access_token_ttl_secs")]
    pub access_token_ttl_secs: u64,
    /// Externally reachable base URL, used in confirmation links.
    #[serde(default = "default_public_url")]
    pub public_url: String,
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
    /// SMTP relay. When unset, outgoing mail is written to the log instead.
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
}

impl Config for ApiConfig {}

fn default_api_port() -> u16 {
    3200
}

fn default_access_token_ttl_secs() -> u64 {
    DEFAULT_ACCESS_TOKEN_TTL_SECS
}

fn default_public_url() -> String {
    "http://localhost:3200".to_owned()
}

fn default_mail_from() -> String {
    "Wayfinder <no-reply@wayfinder.local>".to_owned()
}

fn default_smtp_port() -> u16 {
    587
}
