//! Configuration loading and representation.
//!
//! Credentials and mail routing come from the environment; SKU rule tables come
//! from an optional JSON file, falling back to the built-in storefront tables.
//! Every error here is fatal at startup, before any remote call is made.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use stocksync_catalog::{RulesError, SkuRules};

pub const DEFAULT_WIX_BASE_URL: &str = "https://www.wixapis.com/stores/";
pub const DEFAULT_SENDGRID_BASE_URL: &str = "https://api.sendgrid.com/";
pub const DEFAULT_MAILBOX: &str = "info@naos-optics.com";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_WIX_API_KEY: &str = "WIX_API_KEY";
pub const ENV_WIX_SITE_ID: &str = "WIX_SITE_ID";
pub const ENV_SENDGRID_API_KEY: &str = "SG_API_KEY";
pub const ENV_MAIL_FROM: &str = "STOCKSYNC_MAIL_FROM";
pub const ENV_MAIL_TO: &str = "STOCKSYNC_MAIL_TO";
pub const ENV_WIX_BASE_URL: &str = "WIX_BASE_URL";
pub const ENV_SENDGRID_BASE_URL: &str = "SENDGRID_BASE_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "STOCKSYNC_HTTP_TIMEOUT_SECS";
pub const ENV_SKU_RULES: &str = "STOCKSYNC_SKU_RULES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("environment variable {var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("failed to read SKU rules from {}: {source}", .path.display())]
    RulesIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid SKU rules in {}: {source}", .path.display())]
    Rules {
        path: PathBuf,
        #[source]
        source: RulesError,
    },
}

/// API credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WixConfig {
    pub api_key: ApiKey,
    pub site_id: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendGridConfig {
    pub api_key: ApiKey,
    pub base_url: String,
}

/// Sender and recipient of every report email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    pub from: String,
    pub to: String,
}

impl Default for MailRoute {
    fn default() -> Self {
        Self {
            from: DEFAULT_MAILBOX.to_string(),
            to: DEFAULT_MAILBOX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub wix: WixConfig,
    pub sendgrid: SendGridConfig,
    pub mail: MailRoute,
    pub http_timeout: Duration,
    pub sku_rules_path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment in
    /// production, a map in tests). Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let http_timeout = match get(ENV_HTTP_TIMEOUT_SECS) {
            None => DEFAULT_HTTP_TIMEOUT,
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_HTTP_TIMEOUT_SECS,
                        reason: "timeout must be at least one second".to_string(),
                    });
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_HTTP_TIMEOUT_SECS,
                        reason: e.to_string(),
                    });
                }
            },
        };

        Ok(Self {
            wix: WixConfig {
                api_key: ApiKey::new(require(ENV_WIX_API_KEY)?),
                site_id: require(ENV_WIX_SITE_ID)?,
                base_url: base_url(get(ENV_WIX_BASE_URL), DEFAULT_WIX_BASE_URL, ENV_WIX_BASE_URL)?,
            },
            sendgrid: SendGridConfig {
                api_key: ApiKey::new(require(ENV_SENDGRID_API_KEY)?),
                base_url: base_url(
                    get(ENV_SENDGRID_BASE_URL),
                    DEFAULT_SENDGRID_BASE_URL,
                    ENV_SENDGRID_BASE_URL,
                )?,
            },
            mail: MailRoute {
                from: get(ENV_MAIL_FROM).unwrap_or_else(|| DEFAULT_MAILBOX.to_string()),
                to: get(ENV_MAIL_TO).unwrap_or_else(|| DEFAULT_MAILBOX.to_string()),
            },
            http_timeout,
            sku_rules_path: get(ENV_SKU_RULES).map(PathBuf::from),
        })
    }

    /// SKU rules from the configured file, or the built-in tables.
    pub fn load_sku_rules(&self) -> Result<SkuRules, ConfigError> {
        load_sku_rules(self.sku_rules_path.as_deref())
    }
}

/// Base URLs always end with `/` so endpoint paths can be appended.
fn base_url(value: Option<String>, default: &str, var: &'static str) -> Result<String, ConfigError> {
    let url = value.unwrap_or_else(|| default.to_string());
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            var,
            reason: format!("'{url}' is not an http(s) URL"),
        });
    }
    Ok(if url.ends_with('/') { url } else { format!("{url}/") })
}

pub fn load_sku_rules(path: Option<&Path>) -> Result<SkuRules, ConfigError> {
    let Some(path) = path else {
        info!("using built-in SKU rules");
        return Ok(SkuRules::storefront_defaults());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::RulesIo {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = SkuRules::from_json(&raw).map_err(|source| ConfigError::Rules {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        substitutions = rules.substitutions().count(),
        accessories = rules.accessories().count(),
        "loaded SKU rules"
    );
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_WIX_API_KEY, "wix-key"),
            (ENV_WIX_SITE_ID, "site-1"),
            (ENV_SENDGRID_API_KEY, "sg-key"),
        ]
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = StoreConfig::from_lookup(lookup(&required())).unwrap();

        assert_eq!(config.wix.api_key.expose(), "wix-key");
        assert_eq!(config.wix.site_id, "site-1");
        assert_eq!(config.wix.base_url, DEFAULT_WIX_BASE_URL);
        assert_eq!(config.sendgrid.base_url, DEFAULT_SENDGRID_BASE_URL);
        assert_eq!(config.mail, MailRoute::default());
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(config.sku_rules_path.is_none());
    }

    #[test]
    fn missing_credential_is_reported_by_name() {
        let pairs: Vec<_> = required()
            .into_iter()
            .filter(|(k, _)| *k != ENV_SENDGRID_API_KEY)
            .collect();

        match StoreConfig::from_lookup(lookup(&pairs)) {
            Err(ConfigError::Missing(var)) => assert_eq!(var, "SG_API_KEY"),
            other => panic!("Expected Missing error, got {other:?}"),
        }
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let mut pairs = required();
        pairs[0] = (ENV_WIX_API_KEY, "   ");

        match StoreConfig::from_lookup(lookup(&pairs)) {
            Err(ConfigError::Missing(var)) => assert_eq!(var, "WIX_API_KEY"),
            other => panic!("Expected Missing error, got {other:?}"),
        }
    }

    #[test]
    fn overrides_are_applied() {
        let mut pairs = required();
        pairs.extend([
            (ENV_WIX_BASE_URL, "http://localhost:9000/stores"),
            (ENV_MAIL_TO, "ops@example.com"),
            (ENV_HTTP_TIMEOUT_SECS, "5"),
            (ENV_SKU_RULES, "/etc/stocksync/rules.json"),
        ]);

        let config = StoreConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.wix.base_url, "http://localhost:9000/stores/");
        assert_eq!(config.mail.to, "ops@example.com");
        assert_eq!(config.mail.from, DEFAULT_MAILBOX);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(
            config.sku_rules_path.as_deref(),
            Some(Path::new("/etc/stocksync/rules.json"))
        );
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        for raw in ["abc", "0"] {
            let mut pairs = required();
            pairs.push((ENV_HTTP_TIMEOUT_SECS, raw));

            match StoreConfig::from_lookup(lookup(&pairs)) {
                Err(ConfigError::Invalid { var, .. }) => assert_eq!(var, ENV_HTTP_TIMEOUT_SECS),
                other => panic!("Expected Invalid error for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut pairs = required();
        pairs.push((ENV_SENDGRID_BASE_URL, "ftp://mail"));

        assert!(matches!(
            StoreConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Invalid { var: ENV_SENDGRID_BASE_URL, .. })
        ));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let config = StoreConfig::from_lookup(lookup(&required())).unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("wix-key"));
        assert!(!debug.contains("sg-key"));
    }

    #[test]
    fn rules_default_to_builtin_tables() {
        let rules = load_sku_rules(None).unwrap();
        assert_eq!(rules.substitution("SELVA"), Some("6095936367383"));
    }

    #[test]
    fn rules_are_loaded_from_file() {
        let path = std::env::temp_dir().join(format!("stocksync-rules-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"substitutions":{"ALT":"123"},"accessories":{"123":"456"}}"#).unwrap();

        let rules = load_sku_rules(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(rules.substitution("ALT"), Some("123"));
        assert_eq!(rules.accessory("123"), Some("456"));
        assert_eq!(rules.substitution("SELVA"), None);
    }

    #[test]
    fn missing_rules_file_is_an_error() {
        let path = Path::new("/nonexistent/stocksync/rules.json");

        match load_sku_rules(Some(path)) {
            Err(ConfigError::RulesIo { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected RulesIo error, got {other:?}"),
        }
    }
}
