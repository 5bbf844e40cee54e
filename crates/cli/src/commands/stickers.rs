use std::io::Write;

use anyhow::Result;
use yougile_shared::{CreatedId, NameBody, SearchQuery, UpdateName};

use crate::cli::{StatesCommand, StickerCommand, StickersCommand};
use crate::client::StickerKind;
use crate::context::Context;
use crate::output;

use super::{print_object, require};

pub async fn run(ctx: &Context, cmd: StickersCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        StickersCommand::String(cmd) => run_kind(ctx, StickerKind::String, cmd, out).await,
        StickersCommand::Sprint(cmd) => run_kind(ctx, StickerKind::Sprint, cmd, out).await,
    }
}

async fn run_kind(
    ctx: &Context,
    kind: StickerKind,
    cmd: StickerCommand,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        StickerCommand::List { include_deleted } => {
            let client = ctx.client()?;
            let query = SearchQuery::default().include_deleted(include_deleted);
            let stickers = output::with_spinner(
                ctx.json,
                "Loading stickers...",
                client.list_stickers(kind, &query),
            )
            .await?;

            if ctx.json {
                output::print_json(out, &stickers)?;
                return Ok(());
            }
            let rows: Vec<Vec<String>> = stickers
                .content
                .iter()
                .map(|s| vec![s.id.clone(), s.name.clone()])
                .collect();
            output::print_table(out, &["ID", "Name"], &rows)?;
            Ok(())
        }
        StickerCommand::Get { id } => {
            let client = ctx.client()?;
            let sticker =
                output::with_spinner(ctx.json, "Loading sticker...", client.get_sticker(kind, &id))
                    .await?;
            print_object(ctx, out, &sticker)
        }
        StickerCommand::Create { name } => {
            require(&name, "name is required (--name)")?;
            let client = ctx.client()?;
            let created = output::with_spinner(
                ctx.json,
                "Creating sticker...",
                client.create_sticker(kind, &NameBody { name }),
            )
            .await?;
            report_created(ctx, out, &format!("{} created", kind.title()), &created)
        }
        StickerCommand::Update { id, name } => {
            let client = ctx.client()?;
            let updated = output::with_spinner(
                ctx.json,
                "Updating sticker...",
                client.update_sticker(kind, &id, &UpdateName { name }),
            )
            .await?;
            report_updated(ctx, out, &format!("{} updated", kind.title()), updated, &id)
        }
        StickerCommand::States(cmd) => run_states(ctx, kind, cmd, out).await,
    }
}

async fn run_states(
    ctx: &Context,
    kind: StickerKind,
    cmd: StatesCommand,
    out: &mut dyn Write,
) -> Result<()> {
    let client = ctx.client()?;
    match cmd {
        StatesCommand::List { sticker_id } => {
            // States come embedded in the sticker itself.
            let sticker = output::with_spinner(
                ctx.json,
                "Loading sticker states...",
                client.get_sticker(kind, &sticker_id),
            )
            .await?;
            let states = sticker.states.unwrap_or_default();

            if ctx.json {
                output::print_json(out, &states)?;
                return Ok(());
            }
            let rows: Vec<Vec<String>> = states
                .iter()
                .map(|s| vec![s.id.clone(), s.name.clone()])
                .collect();
            output::print_table(out, &["ID", "Name"], &rows)?;
            Ok(())
        }
        StatesCommand::Get {
            sticker_id,
            state_id,
        } => {
            let state = output::with_spinner(
                ctx.json,
                "Loading sticker state...",
                client.get_sticker_state(kind, &sticker_id, &state_id),
            )
            .await?;
            print_object(ctx, out, &state)
        }
        StatesCommand::Create { sticker_id, name } => {
            require(&name, "name is required (--name)")?;
            let created = output::with_spinner(
                ctx.json,
                "Creating sticker state...",
                client.create_sticker_state(kind, &sticker_id, &NameBody { name }),
            )
            .await?;
            report_created(ctx, out, &format!("{} state created", kind.title()), &created)
        }
        StatesCommand::Update {
            sticker_id,
            state_id,
            name,
        } => {
            let updated = output::with_spinner(
                ctx.json,
                "Updating sticker state...",
                client.update_sticker_state(kind, &sticker_id, &state_id, &UpdateName { name }),
            )
            .await?;
            report_updated(
                ctx,
                out,
                &format!("{} state updated", kind.title()),
                updated,
                &state_id,
            )
        }
    }
}

fn report_created(ctx: &Context, out: &mut dyn Write, what: &str, created: &CreatedId) -> Result<()> {
    if ctx.json {
        output::print_json(out, created)?;
    } else {
        writeln!(out, "{what}: id={}", created.id)?;
    }
    Ok(())
}

/// Update endpoints may answer with an empty body; fall back to the id
/// that was sent.
fn report_updated(
    ctx: &Context,
    out: &mut dyn Write,
    what: &str,
    updated: Option<CreatedId>,
    id: &str,
) -> Result<()> {
    let id = updated.map(|u| u.id).unwrap_or_else(|| id.to_string());
    if ctx.json {
        output::print_json(out, &serde_json::json!({ "id": id }))?;
    } else {
        writeln!(out, "{what}: id={id}")?;
    }
    Ok(())
}
