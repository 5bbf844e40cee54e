use std::io::Write;

use anyhow::Result;

use crate::cli::FilesCommand;
use crate::context::Context;
use crate::output;

pub async fn run(ctx: &Context, cmd: FilesCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        FilesCommand::Upload { file } => {
            let client = ctx.client()?;
            let uploaded =
                output::with_spinner(ctx.json, "Uploading...", client.upload_file(&file)).await?;

            if ctx.json {
                output::print_json(out, &uploaded)?;
            } else {
                writeln!(out, "URL: {}", uploaded.full_url)?;
            }
            Ok(())
        }
    }
}
