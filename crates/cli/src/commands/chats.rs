use std::io::Write;

use anyhow::Result;
use chrono::DateTime;
use yougile_shared::{SearchQuery, SendMessage};

use crate::cli::{ChatsCommand, MessagesCommand};
use crate::context::Context;
use crate::output;

use super::{print_object, require};

pub async fn run(ctx: &Context, cmd: ChatsCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        ChatsCommand::List { page, title } => {
            let query = SearchQuery::page(page.limit, page.offset).title(title);
            list(ctx, &query, out).await
        }
        ChatsCommand::Get { id } => {
            let client = ctx.client()?;
            let chat =
                output::with_spinner(ctx.json, "Loading chat...", client.get_group_chat(&id))
                    .await?;
            print_object(ctx, out, &chat)
        }
        ChatsCommand::Messages(MessagesCommand::List { chat_id, page }) => {
            let query = SearchQuery::page(page.limit, page.offset);
            list_messages(ctx, &chat_id, &query, out).await
        }
        ChatsCommand::Messages(MessagesCommand::Send { chat_id, text }) => {
            require(&text, "message text is required (--text)")?;
            send_message(ctx, &chat_id, text, out).await
        }
    }
}

async fn list(ctx: &Context, query: &SearchQuery, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let chats =
        output::with_spinner(ctx.json, "Loading chats...", client.list_group_chats(query)).await?;

    if ctx.json {
        output::print_json(out, &chats)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = chats
        .content
        .iter()
        .map(|c| vec![c.id.clone(), c.title.clone()])
        .collect();
    output::print_table(out, &["ID", "Title"], &rows)?;
    Ok(())
}

async fn list_messages(
    ctx: &Context,
    chat_id: &str,
    query: &SearchQuery,
    out: &mut dyn Write,
) -> Result<()> {
    let client = ctx.client()?;
    let messages = output::with_spinner(
        ctx.json,
        "Loading messages...",
        client.list_messages(chat_id, query),
    )
    .await?;

    if ctx.json {
        output::print_json(out, &messages)?;
        return Ok(());
    }

    // Message ids are send times in epoch milliseconds.
    let rows: Vec<Vec<String>> = messages
        .content
        .iter()
        .map(|m| {
            let sent = DateTime::from_timestamp_millis(m.id)
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            vec![
                m.id.to_string(),
                m.from_user_id.clone(),
                m.text.clone(),
                sent,
            ]
        })
        .collect();
    output::print_table(out, &["Id", "FromUserId", "Text", "Sent"], &rows)?;
    Ok(())
}

async fn send_message(
    ctx: &Context,
    chat_id: &str,
    text: String,
    out: &mut dyn Write,
) -> Result<()> {
    let client = ctx.client()?;
    let body = SendMessage::plain(text);
    let sent = output::with_spinner(
        ctx.json,
        "Sending message...",
        client.send_message(chat_id, &body),
    )
    .await?;

    if ctx.json {
        output::print_json(out, &sent)?;
    } else {
        writeln!(out, "Message id: {}", sent.id)?;
    }
    Ok(())
}
