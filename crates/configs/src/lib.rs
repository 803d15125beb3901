use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            worker_threads: Some(4),
            log_format: default_log_format(),
        }
    }
}

fn default_log_format() -> String { "compact".into() }

/// Where the remote REST API lives and how the portal talks to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub node_env: NodeEnv,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { url: String::new(), timeout_secs: default_api_timeout(), node_env: NodeEnv::default() }
    }
}

fn default_api_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeEnv {
    #[default]
    Production,
    Development,
    Staging,
    Test,
}

impl NodeEnv {
    pub fn is_development(self) -> bool {
        self == NodeEnv::Development
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeEnv::Production => "production",
            NodeEnv::Development => "development",
            NodeEnv::Staging => "staging",
            NodeEnv::Test => "test",
        }
    }
}

impl fmt::Display for NodeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeEnv {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(NodeEnv::Production),
            "development" => Ok(NodeEnv::Development),
            "staging" => Ok(NodeEnv::Staging),
            "test" => Ok(NodeEnv::Test),
            other => Err(anyhow!("NODE_ENV must be one of production|development|staging|test, got {other:?}")),
        }
    }
}

/// Per-list pagination defaults. Bounds are fixed by the service layer.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default)]
    pub providers: ListPagination,
    #[serde(default)]
    pub activity: ListPagination,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { providers: ListPagination::default(), activity: ListPagination::default() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListPagination {
    #[serde(default = "default_page_size")]
    pub default_size: u64,
    #[serde(default = "default_page")]
    pub default_page: u64,
    /// Query-key namespace, e.g. `providers` turns `page` into `providers:page`.
    #[serde(default)]
    pub scope: Option<String>,
}

impl Default for ListPagination {
    fn default() -> Self {
        Self { default_size: default_page_size(), default_page: default_page(), scope: None }
    }
}

fn default_page_size() -> u64 { 25 }
fn default_page() -> u64 { 1 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment variables win over the TOML file. `lookup` is injected so
    /// the override rules can be exercised without touching process state.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be a port number, got {port:?}"))?;
        }
        if let Some(format) = get("LOG_FORMAT") {
            self.server.log_format = format;
        }
        if let Some(url) = get("API_URL") {
            self.api.url = url;
        }
        if let Some(timeout) = get("API_TIMEOUT_SECS") {
            self.api.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| anyhow!("API_TIMEOUT_SECS must be a whole number of seconds, got {timeout:?}"))?;
        }
        if let Some(env) = get("NODE_ENV") {
            self.api.node_env = env.parse()?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.api.validate()?;
        self.pagination.providers.validate("pagination.providers")?;
        self.pagination.activity.validate("pagination.activity")?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(anyhow!("api.url is empty; set it in config.toml or the API_URL environment variable"));
        }
        let lower = url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl ListPagination {
    fn validate(&self, section: &str) -> Result<()> {
        if self.default_page == 0 {
            return Err(anyhow!("{section}.default_page must be >= 1"));
        }
        if self.default_size == 0 {
            return Err(anyhow!("{section}.default_size must be >= 1"));
        }
        if let Some(scope) = &self.scope {
            if scope.contains(|c: char| c == ':' || c == '&' || c == '=' || c.is_whitespace()) {
                return Err(anyhow!("{section}.scope must not contain ':', '&', '=' or whitespace"));
            }
        }
        Ok(())
    }
}
