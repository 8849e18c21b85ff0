//! Application configuration.

use std::path::PathBuf;

use clap::Args;

/// Full application configuration, assembled from CLI arguments and
/// environment variables.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Backend API settings.
    #[command(flatten)]
    pub api: ApiSettings,

    /// Durable storage locations.
    #[command(flatten)]
    pub storage: StorageSettings,

    /// Admin credential settings.
    #[command(flatten)]
    pub admin: AdminSettings,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingSettings,
}

/// Backend API settings.
#[derive(Debug, Args)]
pub struct ApiSettings {
    /// Backend API base URL
    #[arg(long, env = "TOKRI_API_URL", default_value = "http://localhost:5000")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "TOKRI_API_TIMEOUT_SECONDS", default_value_t = 10)]
    pub timeout_seconds: u64,
}

/// Durable storage locations.
#[derive(Debug, Args)]
pub struct StorageSettings {
    /// Path of the persisted cart blob
    #[arg(long, env = "TOKRI_CART_PATH", default_value = ".tokri/cart.json")]
    pub cart_path: PathBuf,

    /// Path of the persisted admin session
    #[arg(long, env = "TOKRI_SESSION_PATH", default_value = ".tokri/session.json")]
    pub session_path: PathBuf,
}

/// Admin credential settings. The password never appears here, only its
/// digest.
#[derive(Debug, Args)]
pub struct AdminSettings {
    /// Admin username
    #[arg(long, env = "TOKRI_ADMIN_USERNAME", default_value = "admin")]
    pub username: String,

    /// Hex-encoded SHA-256 digest of the admin password
    #[arg(long, env = "TOKRI_ADMIN_PASSWORD_SHA256", hide_env_values = true)]
    pub password_sha256: String,
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
