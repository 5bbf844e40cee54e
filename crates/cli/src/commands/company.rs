use std::io::Write;

use anyhow::Result;

use crate::cli::CompanyCommand;
use crate::context::Context;
use crate::output;

pub async fn run(ctx: &Context, cmd: CompanyCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        CompanyCommand::Get => get(ctx, out).await,
    }
}

async fn get(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let company =
        output::with_spinner(ctx.json, "Loading company...", client.get_company()).await?;
    super::print_object(ctx, out, &company)
}
