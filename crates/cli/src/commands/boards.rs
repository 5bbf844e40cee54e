use std::io::Write;

use anyhow::Result;
use yougile_shared::SearchQuery;

use crate::cli::BoardsCommand;
use crate::context::Context;
use crate::output;

pub async fn run(ctx: &Context, cmd: BoardsCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        BoardsCommand::List {
            page,
            title,
            project_id,
        } => {
            let query = SearchQuery::page(page.limit, page.offset)
                .title(title)
                .project_id(project_id);
            list(ctx, &query, out).await
        }
        BoardsCommand::Get { id } => {
            let client = ctx.client()?;
            let board =
                output::with_spinner(ctx.json, "Loading board...", client.get_board(&id)).await?;
            super::print_object(ctx, out, &board)
        }
    }
}

async fn list(ctx: &Context, query: &SearchQuery, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let boards =
        output::with_spinner(ctx.json, "Loading boards...", client.list_boards(query)).await?;

    if ctx.json {
        output::print_json(out, &boards)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = boards
        .content
        .iter()
        .map(|b| vec![b.id.clone(), b.title.clone(), b.project_id.clone()])
        .collect();
    output::print_table(out, &["ID", "Title", "ProjectId"], &rows)?;
    Ok(())
}
