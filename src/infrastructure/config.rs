use anyhow::{Context, Result};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: u64,
    pub cookie_max_age_hours: u64,
    pub cookie_secure: bool,
    pub client_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // .env is optional
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            host: or("HOST", "127.0.0.1"),
            port: or("PORT", "3000")
                .parse()
                .context("PORT must be a valid port number")?,
            jwt_secret: require("JWT_SECRET")?,
            jwt_ttl_hours: or("JWT_TTL_HOURS", "168")
                .parse()
                .context("JWT_TTL_HOURS must be a whole number of hours")?,
            cookie_max_age_hours: or("COOKIE_MAX_AGE_HOURS", "24")
                .parse()
                .context("COOKIE_MAX_AGE_HOURS must be a whole number of hours")?,
            cookie_secure: parse_bool(&or("COOKIE_SECURE", "true"))
                .context("COOKIE_SECURE must be true or false")?,
            client_url: or("CLIENT_URL", "http://localhost:5173"),
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_model: or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            log_level: or("LOG_LEVEL", "info"),
        })
    }

    pub fn jwt_ttl_secs(&self) -> u64 {
        self.jwt_ttl_hours * 3600
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean '{other}'"),
    }
}
