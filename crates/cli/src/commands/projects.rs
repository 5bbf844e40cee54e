use std::io::Write;

use anyhow::Result;
use yougile_shared::SearchQuery;

use crate::cli::ProjectsCommand;
use crate::context::Context;
use crate::output;

pub async fn run(ctx: &Context, cmd: ProjectsCommand, out: &mut dyn Write) -> Result<()> {
    let client = ctx.client()?;
    match cmd {
        ProjectsCommand::List { page, title } => {
            let query = SearchQuery::page(page.limit, page.offset).title(title);
            let projects =
                output::with_spinner(ctx.json, "Loading projects...", client.list_projects(&query))
                    .await?;
            if ctx.json {
                output::print_json(out, &projects)?;
                return Ok(());
            }
            let rows: Vec<Vec<String>> = projects
                .content
                .iter()
                .map(|p| vec![p.id.clone(), p.title.clone()])
                .collect();
            output::print_table(out, &["ID", "Title"], &rows)?;
            Ok(())
        }
        ProjectsCommand::Get { id } => {
            let project =
                output::with_spinner(ctx.json, "Loading project...", client.get_project(&id))
                    .await?;
            super::print_object(ctx, out, &project)
        }
    }
}
