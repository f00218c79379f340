use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub shop_domain: Option<String>,
    pub storefront_token: Option<String>,
    pub storefront_api_version: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub catalog_page_size: u32,
    pub catalog_max_pages: usize,
    pub products_per_page: usize,
    pub suggest_debounce_ms: u64,
    pub suggest_min_chars: usize,
    pub recent_searches_path: PathBuf,
}

impl AppConfig {
    /// True when both the shop domain and an API token are present, i.e.
    /// live Storefront calls are possible.
    #[must_use]
    pub fn storefront_configured(&self) -> bool {
        self.shop_domain.is_some() && self.storefront_token.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shop_domain", &self.shop_domain)
            .field(
                "storefront_token",
                &self.storefront_token.as_ref().map(|_| "[redacted]"),
            )
            .field("storefront_api_version", &self.storefront_api_version)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("catalog_page_size", &self.catalog_page_size)
            .field("catalog_max_pages", &self.catalog_max_pages)
            .field("products_per_page", &self.products_per_page)
            .field("suggest_debounce_ms", &self.suggest_debounce_ms)
            .field("suggest_min_chars", &self.suggest_min_chars)
            .field("recent_searches_path", &self.recent_searches_path)
            .finish()
    }
}
