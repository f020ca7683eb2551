use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub polygon_api_key: String,
    pub polygon_base_url: String,
    pub scheduler_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".into()),
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            polygon_api_key: env::var("POLYGON_API_KEY").unwrap_or_default(),
            polygon_base_url: env::var("POLYGON_BASE_URL")
                .unwrap_or_else(|_| "https://api.polygon.io".into()),
            scheduler_enabled: env::var("SCHEDULER_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        })
    }
}
