use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{env, fmt, path::PathBuf, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Which image storage backend is active for the whole process.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    Local,
    Cloudinary,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Honour `X-Forwarded-For` when keying rate limits. Only enable behind a proxy.
    #[serde(default)]
    pub trust_proxy_headers: bool,

    /// Email address the admin gate accepts in token claims.
    #[serde(default)]
    pub admin_email: String,

    #[serde(default)]
    pub admin_token_secret: String,

    #[serde(default = "default_admin_token_expiration")]
    pub admin_token_exp_minutes: i64,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub smtp: SmtpConfig,

    #[serde(default)]
    pub contact: ContactConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: StorageBackendKind,

    /// Root directory for the local backend; sections become subdirectories.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// URL prefix local images are served under.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default)]
    pub allow_gif: bool,

    #[serde(default = "default_url_check_timeout")]
    pub url_check_timeout_secs: u64,

    #[serde(default)]
    pub cloudinary: Option<CloudinaryConfig>,
}

#[derive(Deserialize, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,

    #[serde(default = "default_root_folder")]
    pub root_folder: String,

    #[serde(default = "default_cloudinary_api_base")]
    pub api_base: String,
}

#[derive(Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub from_address: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,

    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ContactConfig {
    /// Where new-submission notifications go. Falls back to the admin email.
    #[serde(default)]
    pub admin_email: Option<String>,

    #[serde(default = "default_reply_sender_name")]
    pub reply_sender_name: String,

    #[serde(default = "default_rate_limit_per_hour")]
    pub rate_limit_per_hour: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_admin_token_expiration() -> i64 {
    60
}
fn default_storage_backend() -> StorageBackendKind {
    StorageBackendKind::Local
}
fn default_upload_dir() -> PathBuf {
    PathBuf::from("public/images")
}
fn default_public_prefix() -> String {
    "/images".to_string()
}
fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}
fn default_url_check_timeout() -> u64 {
    5
}
fn default_root_folder() -> String {
    "portfolio".to_string()
}
fn default_cloudinary_api_base() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}
fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_smtp_port() -> u16 {
    587
}
fn default_from_name() -> String {
    "Portfolio".to_string()
}
fn default_smtp_timeout() -> u64 {
    10
}
fn default_reply_sender_name() -> String {
    "Admin of portfolio".to_string()
}
fn default_rate_limit_per_hour() -> u64 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            backend: default_storage_backend(),
            upload_dir: default_upload_dir(),
            public_prefix: default_public_prefix(),
            max_upload_bytes: default_max_upload_bytes(),
            allow_gif: false,
            url_check_timeout_secs: default_url_check_timeout(),
            cloudinary: None,
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        SmtpConfig {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_address: String::new(),
            from_name: default_from_name(),
            timeout_secs: default_smtp_timeout(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            admin_email: None,
            reply_sender_name: default_reply_sender_name(),
            rate_limit_per_hour: default_rate_limit_per_hour(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            database_url: String::new(),
            cors_allowed_origins: default_cors_origins(),
            trust_proxy_headers: false,
            admin_email: String::new(),
            admin_token_secret: String::new(),
            admin_token_exp_minutes: default_admin_token_expiration(),
            storage: StorageConfig::default(),
            smtp: SmtpConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        // APP_DATABASE_URL -> database_url, APP_SMTP__HOST -> smtp.host
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true)
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // sqlx tooling convention
        config.database_url = fill_or_env(config.database_url, "DATABASE_URL")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.admin_token_secret.len() < 32 {
            errors.push("ADMIN_TOKEN_SECRET must be at least 32 characters");
        }
        if self.admin_email.trim().is_empty() {
            errors.push("ADMIN_EMAIL must be set");
        }
        if self.smtp.from_address.trim().is_empty() {
            errors.push("SMTP__FROM_ADDRESS must be set");
        }
        if self.storage.max_upload_bytes == 0 {
            errors.push("STORAGE__MAX_UPLOAD_BYTES must be greater than zero");
        }
        if self.storage.backend == StorageBackendKind::Cloudinary {
            match &self.storage.cloudinary {
                Some(c) if !c.cloud_name.is_empty() && !c.api_key.is_empty() && !c.api_secret.is_empty() => {}
                _ => errors.push("Cloudinary backend selected but STORAGE__CLOUDINARY__* credentials are incomplete"),
            }
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Recipient of contact-form notifications.
    pub fn notification_recipient(&self) -> &str {
        self.contact
            .admin_email
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.admin_email)
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .field("admin_email", &self.admin_email)
            .field("admin_token_secret", &self.admin_token_secret.redact())
            .field("admin_token_exp_minutes", &self.admin_token_exp_minutes)
            .field("storage", &self.storage)
            .field("smtp", &self.smtp)
            .field("contact", &self.contact)
            .finish()
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key.redact())
            .field("api_secret", &self.api_secret.redact())
            .field("root_folder", &self.root_folder)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.redact())
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl From<&AppConfig> for JwtKeys {
    fn from(config: &AppConfig) -> Self {
        let secret = Zeroizing::new(config.admin_token_secret.clone());

        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("encoding", &"[REDACTED]")
            .field("decoding", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/portfolio".into(),
            admin_email: "admin@example.com".into(),
            admin_token_secret: "a".repeat(40),
            smtp: SmtpConfig {
                from_address: "noreply@example.com".into(),
                ..SmtpConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validation_collects_every_problem() {
        let config = AppConfig::default();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("DATABASE_URL"));
        assert!(err.contains("ADMIN_TOKEN_SECRET"));
        assert!(err.contains("ADMIN_EMAIL"));
    }

    #[test]
    fn cloudinary_backend_requires_credentials() {
        let mut config = valid_config();
        config.storage.backend = StorageBackendKind::Cloudinary;
        assert!(config.validate().is_err());

        config.storage.cloudinary = Some(CloudinaryConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            root_folder: default_root_folder(),
            api_base: default_cloudinary_api_base(),
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut config = valid_config();
        config.smtp.password = "hunter2".into();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains(&"a".repeat(40)));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn notification_recipient_falls_back_to_admin_email() {
        let mut config = valid_config();
        assert_eq!(config.notification_recipient(), "admin@example.com");

        config.contact.admin_email = Some("inbox@example.com".into());
        assert_eq!(config.notification_recipient(), "inbox@example.com");
    }

    #[test]
    fn production_rejects_wildcard_cors() {
        let mut config = valid_config();
        config.env = AppEnvironment::Production;
        assert!(config.validate().is_err());

        config.cors_allowed_origins = vec!["https://example.com, https://www.example.com".into()];
        assert!(config.validate().is_ok());
        assert_eq!(config.cors_origins().len(), 2);
    }
}
