/// Accounts service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL.
    pub redis_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// Application display name, used in email subjects and bodies.
    pub app_name: String,
    /// Public base URL that signed links point at (e.g. "https://example.com").
    pub app_url: String,
    /// TCP port to listen on (default 3110). Env var: `ACCOUNTS_PORT`.
    pub accounts_port: u16,
    /// Capacity of the welcome-mail queue (default 64). Env var: `MAIL_QUEUE_DEPTH`.
    pub mail_queue_depth: usize,
}

impl AccountsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            app_name: std::env::var("APP_NAME").expect("APP_NAME"),
            app_url: std::env::var("APP_URL").expect("APP_URL"),
            accounts_port: std::env::var("ACCOUNTS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3110),
            mail_queue_depth: std::env::var("MAIL_QUEUE_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
        }
    }
}
