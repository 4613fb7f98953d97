use super::Environment;

#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub llm: LlmSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Absent is tolerated in the local environment only, where canned
    /// responses stand in for the real model.
    pub api_key: Option<String>,
    pub model: String,
    /// Upper bound on a single generation call.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub token_secret: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}")]
    InvalidVar(&'static str),
}

impl Settings {
    /// Reads configuration from the process environment. `.env` loading is
    /// the caller's concern.
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            environment: optional("APP_ENV")
                .map(Environment::try_from)
                .transpose()
                .map_err(|_| SettingsError::InvalidVar("APP_ENV"))?
                .unwrap_or(Environment::Local),
            server: ServerSettings {
                host: optional("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parsed_or("SERVER_PORT", 3000)?,
            },
            database: DatabaseSettings {
                url: required("DATABASE_URL")?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            llm: LlmSettings {
                api_key: optional("OPENAI_API_KEY"),
                model: optional("OPENAI_MODEL").unwrap_or_else(|| "gpt-4-turbo".to_string()),
                timeout_secs: parsed_or("GENERATION_TIMEOUT_SECS", 30)?,
            },
            auth: AuthSettings {
                token_secret: required("JWT_SECRET")?,
                token_ttl_days: parsed_or("TOKEN_TTL_DAYS", 7)?,
                bcrypt_cost: parsed_or("BCRYPT_COST", 12)?,
            },
        })
    }
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    optional(name).ok_or(SettingsError::MissingVar(name))
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, SettingsError> {
    match optional(name) {
        Some(value) => value.parse().map_err(|_| SettingsError::InvalidVar(name)),
        None => Ok(default),
    }
}
