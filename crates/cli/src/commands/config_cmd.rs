use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommand;
use crate::config;
use crate::context::{Context, ENV_API_KEY, ENV_BASE_URL};
use crate::output;

const API_KEY_MASK: &str = "***";

pub fn run(ctx: &Context, cmd: ConfigCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        ConfigCommand::Path => path(ctx, out),
        ConfigCommand::Show => show(ctx, out),
    }
}

pub fn path(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let path = ctx.config_path()?;
    writeln!(out, "{}", path.display())?;
    Ok(())
}

/// Print the config file. Human output masks the key; `--json` does not.
pub fn show(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let path = ctx.config_path()?;
    let config = config::load(&path)?;

    if ctx.json {
        output::print_json(out, &config)?;
        return Ok(());
    }

    let api_key = if config.api_key.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        API_KEY_MASK.to_string()
    };

    output::print_header(out, "Configuration")?;
    writeln!(out, "  {}      {}", "file:".dimmed(), path.display())?;
    writeln!(out, "  {}  {}", "base_url:".dimmed(), config.base_url)?;
    writeln!(out, "  {}   {}", "api_key:".dimmed(), api_key)?;
    writeln!(out)?;

    // Show environment overrides if active
    for var in [ENV_BASE_URL, ENV_API_KEY] {
        if std::env::var(var).is_ok_and(|v| !v.is_empty()) {
            writeln!(out, "  {} {var} environment variable is active", "ℹ".blue())?;
        }
    }
    Ok(())
}
