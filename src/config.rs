//! Runtime configuration resolved from the environment.

use tracing::info;

/// Environment variable that overrides the valuation service base URL.
pub const API_URL_ENV: &str = "INVENTORY_VALUE_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let config = Self::with_override(std::env::var(API_URL_ENV).ok().as_deref());
        if config.base_url != DEFAULT_API_URL {
            info!(base_url = %config.base_url, "using valuation API override");
        }
        config
    }

    /// Applies an optional base URL override. Blank values are ignored.
    pub fn with_override(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            // Url::join drops the last segment unless the base ends in '/'.
            Some(value) if value.ends_with('/') => Self {
                base_url: value.to_string(),
            },
            Some(value) => Self {
                base_url: format!("{value}/"),
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_override_uses_default() {
        assert_eq!(ApiConfig::with_override(None), ApiConfig::default());
        assert_eq!(ApiConfig::with_override(Some("  ")), ApiConfig::default());
    }

    #[test]
    fn override_gets_trailing_slash() {
        assert_eq!(
            ApiConfig::with_override(Some("https://values.example.com/api")).base_url,
            "https://values.example.com/api/"
        );
        assert_eq!(
            ApiConfig::with_override(Some(" https://values.example.com/ ")).base_url,
            "https://values.example.com/"
        );
    }
}
