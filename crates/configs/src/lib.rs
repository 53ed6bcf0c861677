use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }

/// Image storage backend selection. `local` writes under `local_root` and
/// serves files below `public_base`; `remote` forwards uploads to an HTTP
/// object-storage endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_local_root")]
    pub local_root: String,
    #[serde(default = "default_public_base")]
    pub public_base: String,
    #[serde(default)]
    pub upload_url: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_storage_backend() -> String { "local".into() }
fn default_local_root() -> String { "static/uploads".into() }
fn default_public_base() -> String { "/static/uploads".into() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            local_root: default_local_root(),
            public_base: default_public_base(),
            upload_url: String::new(),
            api_key: String::new(),
        }
    }
}

/// Bootstrap admin credentials; used only to seed the admin_user table
/// when it is empty.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn default_admin_username() -> String { "admin".into() }

impl Default for AdminConfig {
    fn default() -> Self {
        Self { username: default_admin_username(), password: String::new() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: i64,
}

fn default_session_ttl() -> i64 { 12 }

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), session_ttl_hours: default_session_ttl() }
    }
}

/// Booking notification target and phone normalization rules.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub whatsapp_number: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

fn default_country_code() -> String { "91".into() }

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { whatsapp_number: String::new(), country_code: default_country_code() }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.admin.normalize_from_env();
        self.auth.normalize_from_env();
        self.notify.normalize_from_env();
        self.notify.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML may omit the URL; fall back to the environment.
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(v) = std::env::var("STORAGE_BACKEND") {
            if !v.trim().is_empty() { self.backend = v; }
        }
        if self.upload_url.trim().is_empty() {
            if let Ok(v) = std::env::var("STORAGE_UPLOAD_URL") { self.upload_url = v; }
        }
        if self.api_key.trim().is_empty() {
            if let Ok(v) = std::env::var("STORAGE_API_KEY") { self.api_key = v; }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.backend.as_str() {
            "local" => {
                if self.local_root.trim().is_empty() {
                    return Err(anyhow!("storage.local_root is empty"));
                }
            }
            "remote" => {
                if self.upload_url.trim().is_empty() {
                    return Err(anyhow!("storage.upload_url required for the remote backend"));
                }
                if !(self.upload_url.starts_with("http://") || self.upload_url.starts_with("https://")) {
                    return Err(anyhow!("storage.upload_url must start with http(s)"));
                }
            }
            other => return Err(anyhow!("storage.backend must be \"local\" or \"remote\", got {other:?}")),
        }
        Ok(())
    }
}

impl AdminConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(v) = std::env::var("ADMIN_USERNAME") {
            if !v.trim().is_empty() { self.username = v; }
        }
        if self.password.trim().is_empty() {
            if let Ok(v) = std::env::var("ADMIN_PASSWORD") { self.password = v; }
        }
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.trim().is_empty() {
            if let Ok(v) = std::env::var("SECRET_KEY") { self.jwt_secret = v; }
        }
        if self.session_ttl_hours <= 0 {
            self.session_ttl_hours = default_session_ttl();
        }
    }
}

impl NotifyConfig {
    pub fn normalize_from_env(&mut self) {
        if self.whatsapp_number.trim().is_empty() {
            if let Ok(v) = std::env::var("ADMIN_WHATSAPP_NUMBER") { self.whatsapp_number = v; }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.country_code.chars().all(|c| c.is_ascii_digit()) || self.country_code.is_empty() {
            return Err(anyhow!("notify.country_code must be digits"));
        }
        if !self.whatsapp_number.is_empty()
            && !self.whatsapp_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(anyhow!("notify.whatsapp_number must be digits only"));
        }
        Ok(())
    }
}
