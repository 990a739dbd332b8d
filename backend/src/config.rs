use std::env;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Runtime configuration, read once at startup after `dotenv()`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub default_location: String,
    pub static_dir: String,
    pub vision_api_url: String,
    pub remedy_api_url: String,
    pub remedy_api_key: String,
    pub weather_api_url: String,
    pub weather_api_key: String,
    pub tts_api_url: String,
    pub translate_api_url: String,
    pub stage_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_or("PORT", 8000)?;
        let timeout_secs: u64 = parse_or("STAGE_TIMEOUT_SECS", 30)?;

        Ok(Self {
            port,
            jwt_secret: required("JWT_SECRET")?,
            default_location: optional("DEFAULT_LOCATION", "New York"),
            static_dir: optional("STATIC_DIR", "./static"),
            vision_api_url: required("VISION_API_URL")?,
            remedy_api_url: required("REMEDY_API_URL")?,
            remedy_api_key: required("REMEDY_API_KEY")?,
            weather_api_url: optional("WEATHER_API_URL", "https://api.openweathermap.org"),
            weather_api_key: required("WEATHER_API_KEY")?,
            tts_api_url: required("TTS_API_URL")?,
            translate_api_url: required("TRANSLATE_API_URL")?,
            stage_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar(name, raw)),
        Err(_) => Ok(default),
    }
}
