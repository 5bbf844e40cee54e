use std::io::Write;

use anyhow::Result;
use yougile_shared::SearchQuery;

use crate::cli::ColumnsCommand;
use crate::context::Context;
use crate::output;

pub async fn run(ctx: &Context, cmd: ColumnsCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        ColumnsCommand::List {
            page,
            title,
            board_id,
        } => {
            let query = SearchQuery::page(page.limit, page.offset)
                .title(title)
                .board_id(board_id);
            list(ctx, &query, out).await
        }
        ColumnsCommand::Get { id } => {
            let client = ctx.client()?;
            let column =
                output::with_spinner(ctx.json, "Loading column...", client.get_column(&id)).await?;
            super::print_object(ctx, out, &column)
        }
    }
}

async fn list(ctx: &Context, query: &SearchQuery, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    let columns =
        output::with_spinner(ctx.json, "Loading columns...", client.list_columns(query)).await?;

    if ctx.json {
        output::print_json(out, &columns)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = columns
        .content
        .iter()
        .map(|c| vec![c.id.clone(), c.title.clone(), c.board_id.clone()])
        .collect();
    output::print_table(out, &["ID", "Title", "BoardId"], &rows)?;
    Ok(())
}
