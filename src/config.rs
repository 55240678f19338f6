use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "127.0.0.1:3000";
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
pub const DEFAULT_POKEAPI_URL: &str = "https://pokeapi.co/api/v2";

/// Process-wide settings, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub backend_url: String,
    /// `None` keeps the server up; token routes answer 500 until it is set.
    pub jwt_secret: Option<String>,
    pub jwt_ttl_secs: i64,
    pub redis_url: String,
    pub pokeapi_url: String,
    pub upstream_timeout: Duration,
    pub frontend_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            backend_url: env_or("BACKEND_URL", DEFAULT_BACKEND_URL),
            jwt_secret: std::env::var("JWT_TOKEN_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            jwt_ttl_secs: env_parse("JWT_EXP_SECONDS", 3600),
            redis_url: env_or("REDIS_URL", DEFAULT_REDIS_URL),
            pokeapi_url: env_or("POKEAPI_URL", DEFAULT_POKEAPI_URL),
            upstream_timeout: Duration::from_secs(env_parse("UPSTREAM_TIMEOUT_SECONDS", 10)),
            frontend_origin: std::env::var("FRONTEND_ORIGIN").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            jwt_secret: None,
            jwt_ttl_secs: 3600,
            redis_url: DEFAULT_REDIS_URL.into(),
            pokeapi_url: DEFAULT_POKEAPI_URL.into(),
            upstream_timeout: Duration::from_secs(10),
            frontend_origin: None,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}
