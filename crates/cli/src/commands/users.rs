use std::io::Write;

use anyhow::Result;
use yougile_shared::SearchQuery;

use crate::cli::UsersCommand;
use crate::context::Context;
use crate::output;

use super::print_object;

pub async fn run(ctx: &Context, cmd: UsersCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        UsersCommand::List {
            page,
            email,
            project_id,
        } => {
            let query = SearchQuery::page(page.limit, page.offset)
                .email(email)
                .project_id(project_id);
            list(ctx, &query, out).await
        }
        UsersCommand::Get { id } => get(ctx, &id, out).await,
    }
}

async fn list(ctx: &Context, query: &SearchQuery, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let users = output::with_spinner(ctx.json, "Loading users...", client.list_users(query)).await?;

    if ctx.json {
        output::print_json(out, &users)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = users
        .content
        .iter()
        .map(|u| {
            vec![
                u.id.clone(),
                u.email.clone(),
                output::yes_no(u.is_admin.unwrap_or(false)).to_string(),
            ]
        })
        .collect();
    output::print_table(out, &["ID", "Email", "Admin"], &rows)?;
    Ok(())
}

async fn get(ctx: &Context, id: &str, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let user = output::with_spinner(ctx.json, "Loading user...", client.get_user(id)).await?;
    print_object(ctx, out, &user)
}
