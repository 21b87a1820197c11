use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Base URL of the ZIP code lookup service (ViaCEP compatible)
    pub zip_lookup_url: String,
    pub zip_lookup_timeout: Duration,
    /// How long a login session stays valid
    pub session_ttl_hours: i64,
    /// Bootstrap administrator, created on startup when both are set
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        Ok(Self {
            database_url,
            port: parse_var("PORT", 8080),
            zip_lookup_url: env::var("ZIP_LOOKUP_URL")
                .unwrap_or_else(|_| "https://viacep.com.br/ws".to_string()),
            zip_lookup_timeout: Duration::from_secs(parse_var("ZIP_LOOKUP_TIMEOUT_SECS", 5)),
            session_ttl_hours: parse_var("SESSION_TTL_HOURS", 12),
            admin_username: env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Bootstrap administrator credentials, when both are configured
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
