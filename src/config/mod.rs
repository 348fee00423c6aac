use std::{fs, path::Path};

use serde::Deserialize;

use crate::core::brands::{BrandRecord, BrandRegistry};
use crate::core::error::SentryError;
use crate::sources::fetch::BROWSER_USER_AGENT;

pub const DEFAULT_CONFIG_PATH: &str = "config/phish-sentry.toml";
pub const USER_AGENT_ENV: &str = "PHISH_SENTRY_USER_AGENT";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_true")]
    pub fetch_content: bool,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default)]
    pub replace_builtin_brands: bool,
    #[serde(default)]
    pub brands: Vec<BrandRecord>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_concurrent_requests: default_max_concurrent(),
            user_agent: default_user_agent(),
            fetch_content: true,
            max_redirects: default_max_redirects(),
            replace_builtin_brands: false,
            brands: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Effective brand registry: built-ins plus configured brands, or only
    /// the configured ones when `replace_builtin_brands` is set.
    pub fn registry(&self) -> Result<BrandRegistry, SentryError> {
        if self.replace_builtin_brands {
            if self.brands.is_empty() {
                return Err(SentryError::Config(
                    "replace_builtin_brands requires at least one [[brands]] entry".into(),
                ));
            }
            BrandRegistry::new(self.brands.clone())
        } else if self.brands.is_empty() {
            Ok(BrandRegistry::builtin().clone())
        } else {
            BrandRegistry::extended(self.brands.clone())
        }
    }
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig, SentryError> {
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let explicit = path.is_some();
    let path = path.map(Path::new).unwrap_or(default_path);

    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path).map_err(|e| SentryError::Config(e.to_string()))?;
        parse_config(&content)?
    } else if explicit {
        return Err(SentryError::Config(format!(
            "config file not found: {}",
            path.display()
        )));
    } else {
        AppConfig::default()
    };

    if let Ok(agent) = std::env::var(USER_AGENT_ENV) {
        if !agent.trim().is_empty() {
            cfg.user_agent = agent;
        }
    }
    Ok(cfg)
}

pub fn parse_config(content: &str) -> Result<AppConfig, SentryError> {
    let mut cfg: AppConfig = toml::from_str(content)?;
    if cfg.max_concurrent_requests == 0 {
        cfg.max_concurrent_requests = default_max_concurrent();
    }
    if cfg.timeout_ms == 0 {
        cfg.timeout_ms = default_timeout_ms();
    }
    Ok(cfg)
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_concurrent() -> usize {
    4
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_redirects() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.timeout_ms, 10_000);
        assert_eq!(cfg.max_concurrent_requests, 4);
        assert!(cfg.fetch_content);
        assert_eq!(cfg.user_agent, BROWSER_USER_AGENT);
        assert_eq!(cfg.registry().unwrap().len(), 13);
    }

    #[test]
    fn extra_brands_are_appended() {
        let cfg = parse_config(
            r#"
timeout_ms = 2500
max_concurrent_requests = 0

[[brands]]
name = "Acme Bank"
domains = ["acmebank.example"]
keywords = ["acme bank", "acmebank"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.timeout_ms, 2500);
        assert_eq!(cfg.max_concurrent_requests, 4);
        let reg = cfg.registry().unwrap();
        assert_eq!(reg.len(), 14);
        assert_eq!(reg.records().last().unwrap().name, "Acme Bank");
    }

    #[test]
    fn replacing_builtins_needs_brands() {
        let cfg = parse_config("replace_builtin_brands = true").unwrap();
        assert!(cfg.registry().is_err());

        let cfg = parse_config(
            r#"
replace_builtin_brands = true
[[brands]]
name = "Acme"
domains = ["acme.example"]
keywords = ["acme"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.registry().unwrap().len(), 1);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = parse_config("timeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, SentryError::Config(_)));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        assert!(load_config(Some("does/not/exist.toml")).is_err());
    }
}
