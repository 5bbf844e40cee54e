use std::io::Write;

use anyhow::Result;
use yougile_shared::{CreateWebhook, SearchQuery};

use crate::cli::WebhooksCommand;
use crate::context::Context;
use crate::output;

use super::require;

pub async fn run(ctx: &Context, cmd: WebhooksCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        WebhooksCommand::List { include_deleted } => list(ctx, include_deleted, out).await,
        WebhooksCommand::Create { url, event } => {
            require(&url, "url is required (--url)")?;
            require(&event, "event is required (--event)")?;
            create(ctx, CreateWebhook { url, event }, out).await
        }
    }
}

async fn list(ctx: &Context, include_deleted: bool, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let query = SearchQuery::default().include_deleted(include_deleted);
    let webhooks =
        output::with_spinner(ctx.json, "Loading webhooks...", client.list_webhooks(&query))
            .await?;

    if ctx.json {
        output::print_json(out, &webhooks)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = webhooks
        .iter()
        .map(|w| {
            vec![
                w.id.clone(),
                w.url.clone(),
                w.event.clone(),
                output::yes_no(w.disabled.unwrap_or(false)).to_string(),
            ]
        })
        .collect();
    output::print_table(out, &["ID", "Url", "Event", "Disabled"], &rows)?;
    Ok(())
}

async fn create(ctx: &Context, body: CreateWebhook, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let created =
        output::with_spinner(ctx.json, "Creating webhook...", client.create_webhook(&body))
            .await?;

    if ctx.json {
        output::print_json(out, &created)?;
    } else {
        writeln!(out, "Webhook created: id={}", created.id)?;
    }
    Ok(())
}
