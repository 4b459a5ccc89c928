use std::str::FromStr;

/// Static configuration loaded from environment variables at startup.
/// Unset or unparsable values fall back to defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,
    pub gateway_url: String,
    pub request_timeout_secs: u64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 8000),
            cache_ttl_secs: env_or("CACHE_TTL_SECS", 300),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", 1000),
            gateway_url: env_or(
                "MARKET_GATEWAY_URL",
                gateway_client::DEFAULT_BASE_URL.to_string(),
            ),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cache_ttl_secs: 300,
            cache_max_entries: 1000,
            gateway_url: gateway_client::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_garbage() {
        std::env::set_var("SETTINGS_TEST_PORT", "not-a-number");
        assert_eq!(env_or("SETTINGS_TEST_PORT", 8000u16), 8000);
        std::env::remove_var("SETTINGS_TEST_PORT");
    }

    #[test]
    fn env_or_parses_valid_values() {
        std::env::set_var("SETTINGS_TEST_TTL", "600");
        assert_eq!(env_or("SETTINGS_TEST_TTL", 300u64), 600);
        std::env::remove_var("SETTINGS_TEST_TTL");
    }
}
