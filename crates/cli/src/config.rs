use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use yougile_shared::DEFAULT_BASE_URL;

const CONFIG_DIR: &str = "yougile-cli";
const CONFIG_FILE: &str = "config.yaml";

/// Persisted CLI configuration: `~/.config/yougile-cli/config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// Default config file location under the user config directory.
pub fn default_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Cannot determine config directory")?
        .join(CONFIG_DIR);
    Ok(config_dir.join(CONFIG_FILE))
}

/// Read and parse the config at `path`. A missing file is an error.
/// An empty `base_url` falls back to the production host.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let mut config: Config = serde_yaml::from_str(&content)
        .with_context(|| format!("parse config {}", path.display()))?;

    if config.base_url.is_empty() {
        config.base_url = DEFAULT_BASE_URL.to_string();
    }
    Ok(config)
}

/// Write `config` to `path`, creating the parent directory (0700) if needed.
/// The file itself is owner-only (0600).
pub fn save(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_private_dir(parent)
            .with_context(|| format!("create config dir {}", parent.display()))?;
    }
    let content = serde_yaml::to_string(config).context("marshal config")?;
    write_private_file(path, content.as_bytes())
        .with_context(|| format!("write config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

#[cfg(unix)]
fn write_private_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(data)
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("nonexistent.yaml")).is_err());
    }

    #[test]
    fn test_load_valid_yaml_returns_fields_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "base_url: \"https://custom.yougile.com\"\napi_key: \"test-key-123\"\n",
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.base_url, "https://custom.yougile.com");
        assert_eq!(config.api_key, "test-key-123");
    }

    #[test]
    fn test_load_missing_base_url_defaults_to_production() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api_key: \"key\"\n").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, "key");
    }

    #[test]
    fn test_load_invalid_yaml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "base_url: [unterminated\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(format!("{err}").contains("parse config"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config::new("https://x.example", "k-1");

        save(&path, &config).unwrap();
        assert_eq!(load(&path).unwrap(), config);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_uses_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("yougile-cli");
        let path = parent.join("config.yaml");
        save(&path, &Config::new(DEFAULT_BASE_URL, "secret")).unwrap();

        let file_mode = std::fs::metadata(&path).unwrap().permissions().mode();
        let dir_mode = std::fs::metadata(&parent).unwrap().permissions().mode();
        assert_eq!(file_mode & 0o777, 0o600);
        assert_eq!(dir_mode & 0o777, 0o700);
    }

    #[test]
    fn test_save_overwrites_previous_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        save(&path, &Config::new("https://a.example", "old")).unwrap();
        save(&path, &Config::new("https://b.example", "new")).unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.api_key, "new");
        assert_eq!(config.base_url, "https://b.example");
    }
}
