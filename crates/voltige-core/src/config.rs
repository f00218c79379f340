use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process. Unlike [`load_app_config`] this never touches `.env` files, so
/// callers that manage the environment themselves stay in control.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration through an injected env-var lookup.
/// All parsing and validation lives here, against the lookup function
/// rather than the process environment, so tests run on a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("VOLTIGE_ENV", "development"));

    let bind_addr = parse_addr("VOLTIGE_BIND_ADDR", "0.0.0.0:4000")?;
    let log_level = or_default("VOLTIGE_LOG_LEVEL", "info");

    // A configured shop domain makes the API token mandatory; without a
    // domain the gateway runs on the fallback catalog and a stray token
    // is simply carried along.
    let shop_domain = lookup("VOLTIGE_SHOP_DOMAIN")
        .ok()
        .filter(|value| !value.trim().is_empty());
    let storefront_token = if shop_domain.is_some() {
        Some(require("VOLTIGE_STOREFRONT_TOKEN")?)
    } else {
        lookup("VOLTIGE_STOREFRONT_TOKEN").ok()
    };

    let storefront_api_version = or_default("VOLTIGE_STOREFRONT_API_VERSION", "2024-01");
    let http_timeout_secs = parse_u64("VOLTIGE_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VOLTIGE_USER_AGENT", "voltige/0.1 (storefront-gateway)");

    let catalog_page_size = parse_u32("VOLTIGE_CATALOG_PAGE_SIZE", "100")?;
    if catalog_page_size == 0 || catalog_page_size > 250 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VOLTIGE_CATALOG_PAGE_SIZE".to_string(),
            reason: "must be between 1 and 250".to_string(),
        });
    }
    let catalog_max_pages = parse_usize("VOLTIGE_CATALOG_MAX_PAGES", "20")?;
    if catalog_max_pages == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VOLTIGE_CATALOG_MAX_PAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let products_per_page = parse_usize("VOLTIGE_PRODUCTS_PER_PAGE", "9")?;
    let suggest_debounce_ms = parse_u64("VOLTIGE_SUGGEST_DEBOUNCE_MS", "300")?;
    let suggest_min_chars = parse_usize("VOLTIGE_SUGGEST_MIN_CHARS", "2")?;
    let recent_searches_path = PathBuf::from(or_default(
        "VOLTIGE_RECENT_SEARCHES_PATH",
        "./.voltige/recent-searches.json",
    ));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shop_domain,
        storefront_token,
        storefront_api_version,
        http_timeout_secs,
        user_agent,
        catalog_page_size,
        catalog_max_pages,
        products_per_page,
        suggest_debounce_ms,
        suggest_min_chars,
        recent_searches_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
