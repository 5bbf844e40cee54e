#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use yougile_cli::cli::{Commands, PageArgs};
use yougile_cli::commands;
use yougile_cli::config::{self, Config};
use yougile_cli::context::Context;

pub const API_KEY: &str = "test-key";

/// Temp config pointing at a mock server. Keep the `TempDir` alive for the
/// duration of the test.
pub struct TestEnv {
    pub dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnv {
    pub fn with_config(base_url: &str, api_key: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        config::save(&config_path, &Config::new(base_url, api_key)).unwrap();
        Self { dir, config_path }
    }

    /// No config file on disk yet.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("yougile").join("config.yaml");
        Self { dir, config_path }
    }

    pub fn context(&self, json: bool) -> Context {
        Context::new(Some(self.config_path.clone()), json)
    }
}

/// Run a command and return what it wrote.
pub async fn run(ctx: &Context, command: Commands) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    commands::run(ctx, command, &mut buf).await?;
    Ok(String::from_utf8(buf).unwrap())
}

pub fn page(limit: u32, offset: u32) -> PageArgs {
    PageArgs { limit, offset }
}
