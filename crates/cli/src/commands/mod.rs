pub mod auth;
pub mod boards;
pub mod chats;
pub mod columns;
pub mod company;
pub mod config_cmd;
pub mod crm;
pub mod departments;
pub mod files;
pub mod projects;
pub mod stickers;
pub mod tasks;
pub mod users;
pub mod webhooks;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::cli::*;
use crate::context::Context;
use crate::output;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let ctx = Context::new(cli.config, cli.json);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&ctx, cli.command, &mut out).await?;
    out.flush()?;
    Ok(())
}

/// Run one command against `ctx`, writing results to `out`.
pub async fn run(ctx: &Context, command: Commands, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Config(cmd) => config_cmd::run(ctx, cmd, out),
        Commands::Auth(cmd) => auth::run(ctx, cmd, out).await,
        Commands::Company(cmd) => company::run(ctx, cmd, out).await,
        Commands::Users(cmd) => users::run(ctx, cmd, out).await,
        Commands::Projects(cmd) => projects::run(ctx, cmd, out).await,
        Commands::Boards(cmd) => boards::run(ctx, cmd, out).await,
        Commands::Columns(cmd) => columns::run(ctx, cmd, out).await,
        Commands::Tasks(cmd) => tasks::run(ctx, cmd, out).await,
        Commands::Departments(cmd) => departments::run(ctx, cmd, out).await,
        Commands::Webhooks(cmd) => webhooks::run(ctx, cmd, out).await,
        Commands::Files(cmd) => files::run(ctx, cmd, out).await,
        Commands::Chats(cmd) => chats::run(ctx, cmd, out).await,
        Commands::Stickers(cmd) => stickers::run(ctx, cmd, out).await,
        Commands::Crm(cmd) => crm::run(ctx, cmd, out).await,
    }
}

/// Single object: compact JSON with `--json`, indented otherwise.
pub(crate) fn print_object<T: Serialize + ?Sized>(
    ctx: &Context,
    out: &mut dyn Write,
    value: &T,
) -> Result<()> {
    if ctx.json {
        output::print_json(out, value)?;
    } else {
        output::print_pretty(out, value)?;
    }
    Ok(())
}

/// Fail before any request when a required value is blank.
pub(crate) fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{message}");
    }
    Ok(())
}

/// `"a, b,,c"` → `["a", "b", "c"]`.
pub(crate) fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ids_trims_and_skips_blanks() {
        assert_eq!(split_ids(" u1, u2 ,,u3"), vec!["u1", "u2", "u3"]);
        assert!(split_ids("").is_empty());
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("  ", "title is required (--title)").is_err());
        assert!(require("x", "title is required (--title)").is_ok());
    }
}
