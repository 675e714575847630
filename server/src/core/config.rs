use crate::auth::JwtConfig;

/// Server configuration
///
/// Every item can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory for database and logs |
/// | HTTP_PORT | 3001 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | NOTIFY_BUFFER | 128 | Notification queue capacity |
/// | SUPPORT_INBOX | support@streamline.local | Recipient for ticket notifications |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Capacity of the outbound notification queue
    pub notify_buffer: usize,
    /// Inbox notified when a support ticket is created
    pub support_inbox: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            notify_buffer: std::env::var("NOTIFY_BUFFER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(128),
            support_inbox: std::env::var("SUPPORT_INBOX")
                .unwrap_or_else(|_| "support@streamline.local".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn database_path(&self) -> String {
        format!("{}/streamline.db", self.work_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
