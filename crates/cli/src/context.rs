use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::client::YougileClient;
use crate::config::{self, Config, DEFAULT_BASE_URL};

pub const ENV_BASE_URL: &str = "YOUGILE_BASE_URL";
pub const ENV_API_KEY: &str = "YOUGILE_API_KEY";

/// Per-invocation settings shared by every command: where the config
/// lives and whether output is JSON.
#[derive(Debug, Clone, Default)]
pub struct Context {
    config_path: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>, json: bool) -> Self {
        Self { config_path, json }
    }

    /// `--config` if given, otherwise the default location.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => config::default_path().context("resolve config path"),
        }
    }

    /// Config file contents with environment overrides applied. Without a
    /// config file the defaults are used, so the overrides alone suffice.
    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_path()?;
        let mut config = if path.exists() {
            config::load(&path).context("load config")?
        } else {
            Config::new(DEFAULT_BASE_URL, "")
        };

        if let Some(url) = env_override(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(key) = env_override(ENV_API_KEY) {
            config.api_key = key;
        }
        Ok(config)
    }

    /// Client carrying the configured API key.
    pub fn client(&self) -> Result<YougileClient> {
        let config = self.load_config()?;
        YougileClient::authenticated(&config).context("create API client")
    }

    /// Base URL for the email/password endpoints.
    pub fn base_url(&self) -> Result<String> {
        Ok(self.load_config()?.base_url)
    }
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    /// Serializes tests that read or set the override variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clean_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_API_KEY);
        guard
    }

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_config_path_prefers_flag() {
        let ctx = Context::new(Some(PathBuf::from("/tmp/custom.yaml")), false);
        assert_eq!(ctx.config_path().unwrap(), PathBuf::from("/tmp/custom.yaml"));
    }

    #[test]
    fn test_client_without_config_or_key_fails() {
        let _env = clean_env();
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Some(dir.path().join("missing.yaml")), false);
        let err = ctx.client().err().unwrap();
        assert!(format!("{err:#}").contains("api_key not set"));
    }

    #[test]
    fn test_client_with_empty_key_fails() {
        let _env = clean_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "base_url: https://x.example\n");

        let ctx = Context::new(Some(path), false);
        let err = ctx.client().err().unwrap();
        assert!(format!("{err:#}").contains("api_key not set"));
    }

    #[test]
    fn test_unparsable_config_fails() {
        let _env = clean_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "base_url: [unterminated\n");

        let err = Context::new(Some(path), false).load_config().unwrap_err();
        assert!(format!("{err:#}").contains("load config"));
    }

    #[test]
    fn test_api_key_env_without_config_file() {
        let _env = clean_env();
        std::env::set_var(ENV_API_KEY, "env-key");
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Some(dir.path().join("missing.yaml")), false);

        let config = ctx.load_config();
        std::env::remove_var(ENV_API_KEY);

        let config = config.unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_overrides_config_file() {
        let _env = clean_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "base_url: https://file.example\napi_key: file-key\n");
        std::env::set_var(ENV_BASE_URL, "https://env.example");
        std::env::set_var(ENV_API_KEY, "env-key");

        let config = Context::new(Some(path), false).load_config();
        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_API_KEY);

        let config = config.unwrap();
        assert_eq!(config.base_url, "https://env.example");
        assert_eq!(config.api_key, "env-key");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let _env = clean_env();
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "base_url: https://file.example\napi_key: file-key\n");
        std::env::set_var(ENV_API_KEY, "");

        let config = Context::new(Some(path), false).load_config();
        std::env::remove_var(ENV_API_KEY);

        assert_eq!(config.unwrap().api_key, "file-key");
    }

    #[test]
    fn test_base_url_env_without_config_file() {
        let _env = clean_env();
        std::env::set_var(ENV_BASE_URL, "https://env.example");
        let dir = tempfile::tempdir().unwrap();

        let url = Context::new(Some(dir.path().join("missing.yaml")), false).base_url();
        std::env::remove_var(ENV_BASE_URL);

        assert_eq!(url.unwrap(), "https://env.example");
    }
}
