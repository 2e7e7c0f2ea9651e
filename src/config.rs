use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Entry page served for every unmatched GET route.
pub const SPA_ENTRY: &str = "phanreal.html";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_ms: u64,
    pub public_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_key = lookup("OPENAI_API_KEY").filter(|value| !value.trim().is_empty());

        let base_url = lookup("OPENAI_BASE_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = lookup("OPENAI_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let public_dir = lookup("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

        Self {
            port,
            api_key,
            base_url,
            timeout_ms,
            public_dir,
        }
    }

    pub fn spa_entry(&self) -> PathBuf {
        self.public_dir.join(SPA_ENTRY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(cfg.spa_entry(), PathBuf::from("public/phanreal.html"));
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("PORT", "8081"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://127.0.0.1:9999/v1"),
            ("OPENAI_TIMEOUT_MS", "1500"),
            ("PUBLIC_DIR", "/srv/www"),
        ]);
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.base_url, "http://127.0.0.1:9999/v1");
        assert_eq!(cfg.timeout_ms, 1500);
        assert_eq!(cfg.public_dir, PathBuf::from("/srv/www"));
    }

    #[test]
    fn invalid_numbers_and_blank_key_fall_back() {
        let cfg = config_from(&[
            ("PORT", "not-a-port"),
            ("OPENAI_TIMEOUT_MS", "-5"),
            ("OPENAI_API_KEY", "   "),
        ]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(cfg.api_key, None);
    }
}
