use std::io::Write;

use anyhow::Result;
use yougile_shared::SearchQuery;

use crate::cli::DepartmentsCommand;
use crate::context::Context;
use crate::output;

pub async fn run(ctx: &Context, cmd: DepartmentsCommand, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    match cmd {
        DepartmentsCommand::List {
            page,
            title,
            parent_id,
        } => {
            let query = SearchQuery::page(page.limit, page.offset)
                .title(title)
                .parent_id(parent_id);
            let departments = output::with_spinner(
                ctx.json,
                "Loading departments...",
                client.list_departments(&query),
            )
            .await?;

            if ctx.json {
                output::print_json(out, &departments)?;
                return Ok(());
            }

            let rows: Vec<Vec<String>> = departments
                .content
                .iter()
                .map(|d| {
                    vec![
                        d.id.clone(),
                        d.title.clone(),
                        d.parent_id.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            output::print_table(out, &["ID", "Title", "ParentId"], &rows)?;
            Ok(())
        }
        DepartmentsCommand::Get { id } => {
            let department = output::with_spinner(
                ctx.json,
                "Loading department...",
                client.get_department(&id),
            )
            .await?;
            super::print_object(ctx, out, &department)
        }
    }
}
