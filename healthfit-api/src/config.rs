use std::{env, str::FromStr, time::Duration};

use dotenv::dotenv;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_RATE_LIMIT_MAX: u32 = 100;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value \"{value}\"")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub database_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Without a key the coach always answers in offline mode.
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    /// Requests one client IP may make per `rate_limit_window`.
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let or_default = |name: &str, default: &str| lookup(name).unwrap_or(default.to_owned());

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let rate_limit_max = positive(
            "RATE_LIMIT_MAX",
            parse_or(&lookup, "RATE_LIMIT_MAX", DEFAULT_RATE_LIMIT_MAX)?,
        )?;
        let rate_limit_window_secs = positive(
            "RATE_LIMIT_WINDOW_SECS",
            parse_or(
                &lookup,
                "RATE_LIMIT_WINDOW_SECS",
                DEFAULT_RATE_LIMIT_WINDOW_SECS,
            )?,
        )?;

        Ok(Self {
            bind_address: or_default("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            port,
            database_url: required("DATABASE_URL")?,
            supabase_url: required("SUPABASE_URL")?,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            groq_api_key: lookup("GROQ_API_KEY").filter(|key| !key.is_empty()),
            groq_base_url: or_default("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            groq_model: or_default("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            rate_limit_max,
            rate_limit_window: Duration::from_secs(rate_limit_window_secs),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn positive<T: Default + PartialEq + ToString>(
    name: &'static str,
    value: T,
) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}
