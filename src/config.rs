use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "order-register.toml";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: Url,
    pub user_page_size: u32,
    pub order_page_size: u32,
    pub reconcile_stock_on_update: bool,
    pub channel_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Constant input, always parses.
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default base URL is valid"),
            user_page_size: 2,
            order_page_size: 5,
            reconcile_stock_on_update: true,
            channel_capacity: 32,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    user_page_size: Option<u32>,
    order_page_size: Option<u32>,
    reconcile_stock_on_update: Option<bool>,
    channel_capacity: Option<usize>,
}

impl Settings {
    /// Defaults, then the TOML file, then environment, then the CLI override.
    ///
    /// A missing default config file is fine; a missing file that was asked for
    /// explicitly is an error.
    pub fn load(config_path: Option<&Path>, base_url_override: Option<&str>) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        match fs::read_to_string(&path) {
            Ok(raw) => settings.apply_file(&raw, &path)?,
            Err(e) if config_path.is_some() => {
                return Err(ConfigError::File { path: path.display().to_string(), reason: e.to_string() });
            }
            Err(_) => {}
        }

        settings.apply_env(|key| std::env::var(key).ok())?;

        if let Some(url) = base_url_override {
            settings.api_base_url = parse_base_url(url)?;
        }
        Ok(settings)
    }

    fn apply_file(&mut self, raw: &str, path: &Path) -> Result<(), ConfigError> {
        let file: FileSettings = toml::from_str(raw).map_err(|e| ConfigError::File {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if let Some(url) = file.api_base_url {
            self.api_base_url = parse_base_url(&url)?;
        }
        if let Some(size) = file.user_page_size {
            self.user_page_size = positive("user_page_size", size)?;
        }
        if let Some(size) = file.order_page_size {
            self.order_page_size = positive("order_page_size", size)?;
        }
        if let Some(flag) = file.reconcile_stock_on_update {
            self.reconcile_stock_on_update = flag;
        }
        if let Some(capacity) = file.channel_capacity {
            self.channel_capacity = capacity.max(1);
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(url) = lookup("ORDER_REGISTER_API_BASE_URL").or_else(|| lookup("API_BASE_URL")) {
            self.api_base_url = parse_base_url(&url)?;
        }
        if let Some(v) = lookup("ORDER_REGISTER_USER_PAGE_SIZE") {
            self.user_page_size = positive("ORDER_REGISTER_USER_PAGE_SIZE", parse_value("ORDER_REGISTER_USER_PAGE_SIZE", &v)?)?;
        }
        if let Some(v) = lookup("ORDER_REGISTER_ORDER_PAGE_SIZE") {
            self.order_page_size = positive("ORDER_REGISTER_ORDER_PAGE_SIZE", parse_value("ORDER_REGISTER_ORDER_PAGE_SIZE", &v)?)?;
        }
        if let Some(v) = lookup("ORDER_REGISTER_RECONCILE_STOCK") {
            self.reconcile_stock_on_update = parse_value("ORDER_REGISTER_RECONCILE_STOCK", &v)?;
        }
        Ok(())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn positive(key: &str, value: u32) -> Result<u32, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_list_sizes() {
        let settings = Settings::default();
        assert_eq!(settings.user_page_size, 2);
        assert_eq!(settings.order_page_size, 5);
        assert!(settings.reconcile_stock_on_update);
        assert_eq!(settings.api_base_url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        let raw = r#"
            api_base_url = "https://shop.example.com"
            order_page_size = 10
            reconcile_stock_on_update = false
        "#;
        settings.apply_file(raw, Path::new("test.toml")).unwrap();
        assert_eq!(settings.api_base_url.host_str(), Some("shop.example.com"));
        assert_eq!(settings.order_page_size, 10);
        assert_eq!(settings.user_page_size, 2);
        assert!(!settings.reconcile_stock_on_update);
    }

    #[test]
    fn env_prefers_specific_base_url() {
        let mut settings = Settings::default();
        settings
            .apply_env(env(&[
                ("API_BASE_URL", "http://fallback:1"),
                ("ORDER_REGISTER_API_BASE_URL", "http://primary:2"),
            ]))
            .unwrap();
        assert_eq!(settings.api_base_url.as_str(), "http://primary:2/");

        let mut settings = Settings::default();
        settings.apply_env(env(&[("API_BASE_URL", "http://fallback:1")])).unwrap();
        assert_eq!(settings.api_base_url.as_str(), "http://fallback:1/");
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.apply_env(env(&[("ORDER_REGISTER_USER_PAGE_SIZE", "0")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.apply_env(env(&[("ORDER_REGISTER_RECONCILE_STOCK", "maybe")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.apply_env(env(&[("API_BASE_URL", "ftp://files")])),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            settings.apply_env(env(&[("API_BASE_URL", "not a url")])),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/order-register.toml")), None);
        assert!(matches!(result, Err(ConfigError::File { .. })));
    }
}
