use crate::errors::AppError;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_RATINGS_API_URL: &str = "http://localhost:8082";
const DEFAULT_MUSICS_API_URL: &str = "http://localhost:8081";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub ratings_api_url: String,
    pub musics_api_url: String,
    pub jwt_secret: String,
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Reads the configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::EnvError(format!("PORT is not a valid port: {}", e)))?,
            None => DEFAULT_PORT,
        };

        let rate_limit_per_minute = match lookup("RATE_LIMIT_PER_MINUTE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AppError::EnvError("RATE_LIMIT_PER_MINUTE must be a positive integer".into())
                })?,
            None => DEFAULT_RATE_LIMIT_PER_MINUTE,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::EnvError("JWT_SECRET must be set".into()))?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            port,
            ratings_api_url: base_url(lookup("RATINGS_API_URL"), DEFAULT_RATINGS_API_URL),
            musics_api_url: base_url(lookup("MUSICS_API_URL"), DEFAULT_MUSICS_API_URL),
            jwt_secret,
            allowed_origins,
            rate_limit_per_minute,
        })
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}
