use std::io::Write;

use anyhow::Result;
use yougile_shared::{ChatSubscribers, CreateTask, SearchQuery, UpdateTask};

use crate::cli::{ChatSubscribersCommand, TasksCommand};
use crate::context::Context;
use crate::output;

use super::{print_object, require, split_ids};

pub async fn run(ctx: &Context, cmd: TasksCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        TasksCommand::List {
            page,
            title,
            column_id,
        } => {
            let query = SearchQuery::page(page.limit, page.offset)
                .title(title)
                .column_id(column_id);
            list(ctx, &query, out).await
        }
        TasksCommand::Get { id } => {
            let client = ctx.client()?;
            let task =
                output::with_spinner(ctx.json, "Loading task...", client.get_task(&id)).await?;
            print_object(ctx, out, &task)
        }
        TasksCommand::Create {
            title,
            column_id,
            description,
            assigned,
        } => {
            require(&title, "title is required (--title)")?;
            let body = CreateTask {
                title,
                column_id: column_id.filter(|c| !c.is_empty()),
                description: description.filter(|d| !d.is_empty()),
                assigned: assigned.as_deref().map(split_ids).filter(|ids| !ids.is_empty()),
            };
            create(ctx, &body, out).await
        }
        TasksCommand::Update {
            id,
            title,
            column_id,
            description,
            assigned,
            completed,
            archived,
        } => {
            let body = UpdateTask {
                title,
                column_id,
                description,
                assigned: assigned.as_deref().map(split_ids),
                completed,
                archived,
            };
            update(ctx, &id, &body, out).await
        }
        TasksCommand::ChatSubscribers(ChatSubscribersCommand::Get { task_id }) => {
            get_subscribers(ctx, &task_id, out).await
        }
        TasksCommand::ChatSubscribers(ChatSubscribersCommand::Update { task_id, user_ids }) => {
            let ids = split_ids(&user_ids);
            if ids.is_empty() {
                anyhow::bail!("user-ids is required (--user-ids id1,id2,...)");
            }
            update_subscribers(ctx, &task_id, ids, out).await
        }
    }
}

async fn list(ctx: &Context, query: &SearchQuery, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let tasks = output::with_spinner(ctx.json, "Loading tasks...", client.list_tasks(query)).await?;

    if ctx.json {
        output::print_json(out, &tasks)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = tasks
        .content
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.title.clone(),
                t.column_id.clone().unwrap_or_default(),
            ]
        })
        .collect();
    output::print_table(out, &["ID", "Title", "ColumnId"], &rows)?;
    Ok(())
}

async fn create(ctx: &Context, body: &CreateTask, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let created =
        output::with_spinner(ctx.json, "Creating task...", client.create_task(body)).await?;

    if ctx.json {
        output::print_json(out, &created)?;
    } else {
        writeln!(out, "Task created: id={}", created.id)?;
    }
    Ok(())
}

async fn update(ctx: &Context, id: &str, body: &UpdateTask, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let updated =
        output::with_spinner(ctx.json, "Updating task...", client.update_task(id, body)).await?;
    let id = updated.map(|u| u.id).unwrap_or_else(|| id.to_string());

    if ctx.json {
        output::print_json(out, &serde_json::json!({ "id": id }))?;
    } else {
        writeln!(out, "Task updated: id={id}")?;
    }
    Ok(())
}

async fn get_subscribers(ctx: &Context, task_id: &str, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let subscribers = output::with_spinner(
        ctx.json,
        "Loading chat subscribers...",
        client.get_chat_subscribers(task_id),
    )
    .await?;

    if ctx.json {
        output::print_json(out, &subscribers)?;
        return Ok(());
    }
    for id in &subscribers {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

async fn update_subscribers(
    ctx: &Context,
    task_id: &str,
    ids: Vec<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let client = ctx.client()?;
    let body = ChatSubscribers { content: ids };
    output::with_spinner(
        ctx.json,
        "Updating chat subscribers...",
        client.update_chat_subscribers(task_id, &body),
    )
    .await?;

    if ctx.json {
        output::print_json(out, &serde_json::json!({ "taskId": task_id, "content": body.content }))?;
    } else {
        writeln!(out, "Chat subscribers updated for task {task_id}")?;
    }
    Ok(())
}
