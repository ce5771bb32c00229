use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub reminders: ReminderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Which backing store serves requests and matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_whatsapp_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_notification_timeout")]
    pub timeout_secs: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_whatsapp_api_url(),
            access_token: String::new(),
            timeout_secs: default_notification_timeout(),
        }
    }
}

fn default_whatsapp_api_url() -> String {
    "https://graph.facebook.com/v17.0/PHONE_NUMBER_ID/messages".to_string()
}
fn default_notification_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_reminder_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_confirm_within_hours")]
    pub confirm_within_hours: i64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_reminder_interval(),
            confirm_within_hours: default_confirm_within_hours(),
        }
    }
}

fn default_reminder_interval() -> u64 { 3600 }
fn default_confirm_within_hours() -> i64 { 24 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SHABBAT__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SHABBAT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SHABBAT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SHABBAT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment variables on top of the layered config
///
/// `DATABASE_URL` wins over `database.url`; `WHATSAPP_ACCESS_TOKEN` fills
/// `notifications.access_token`.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(token) = env::var("WHATSAPP_ACCESS_TOKEN") {
        builder = builder.set_override("notifications.access_token", token)?;
    }

    builder.build()
}
