use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::DateTime;
use dialoguer::{theme::ColorfulTheme, Password};
use yougile_shared::{CompaniesRequest, CreateKeyRequest, KeySearchRequest, DEFAULT_BASE_URL};

use crate::cli::{AuthCommand, Credentials, KeysCommand};
use crate::client::YougileClient;
use crate::config::{self, Config};
use crate::context::Context;
use crate::login::login;
use crate::output;

use super::require;

pub async fn run(ctx: &Context, cmd: AuthCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        AuthCommand::Login {
            credentials,
            company_id,
            base_url,
        } => login_cmd(ctx, credentials, company_id, base_url, out).await,
        AuthCommand::Companies { credentials } => companies(ctx, credentials, out).await,
        AuthCommand::Keys(KeysCommand::List {
            credentials,
            company_id,
        }) => list_keys(ctx, credentials, company_id, out).await,
        AuthCommand::Keys(KeysCommand::Create {
            credentials,
            company_id,
        }) => create_key(ctx, credentials, company_id, out).await,
        AuthCommand::Keys(KeysCommand::Delete { key }) => delete_key(ctx, &key, out).await,
    }
}

/// Email and password, prompting for the password when it wasn't passed.
fn resolve_credentials(credentials: Credentials) -> Result<(String, String)> {
    require(
        &credentials.email,
        "email and password are required (--email, --password)",
    )?;
    let password = match credentials.password.filter(|p| !p.is_empty()) {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("  Password for {}", credentials.email))
            .interact()
            .context("read password")?,
    };
    Ok((credentials.email, password))
}

async fn login_cmd(
    ctx: &Context,
    credentials: Credentials,
    company_id: Option<String>,
    base_url: Option<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let (email, password) = resolve_credentials(credentials)?;
    let path = ctx.config_path()?;
    let base_url = base_url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let key = output::with_spinner(
        ctx.json,
        "Logging in...",
        login(&base_url, &email, &password, company_id.as_deref()),
    )
    .await
    .context("login")?;

    let config = Config::new(base_url.trim_end_matches('/'), key);
    config::save(&path, &config).context("save config")?;

    if ctx.json {
        output::print_json(out, &serde_json::json!({ "config_path": path }))?;
    } else {
        writeln!(out, "API key saved to {}", path.display())?;
    }
    Ok(())
}

async fn companies(ctx: &Context, credentials: Credentials, out: &mut dyn Write) -> Result<()> {
    let (login, password) = resolve_credentials(credentials)?;
    let client = YougileClient::new(&ctx.base_url()?)?;

    let page = output::with_spinner(
        ctx.json,
        "Loading companies...",
        client.get_companies(&CompaniesRequest { login, password }),
    )
    .await?;

    if ctx.json {
        output::print_json(out, &page)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = page
        .content
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.name.clone(),
                output::yes_no(c.is_admin.unwrap_or(false)).to_string(),
            ]
        })
        .collect();
    output::print_table(out, &["ID", "Name", "Admin"], &rows)?;
    Ok(())
}

async fn list_keys(
    ctx: &Context,
    credentials: Credentials,
    company_id: Option<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let (login, password) = resolve_credentials(credentials)?;
    let client = YougileClient::new(&ctx.base_url()?)?;
    let body = KeySearchRequest {
        login,
        password,
        company_id: company_id.filter(|c| !c.is_empty()),
    };

    let keys = output::with_spinner(ctx.json, "Loading API keys...", client.search_keys(&body))
        .await?;

    if ctx.json {
        output::print_json(out, &keys)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = keys
        .iter()
        .map(|k| {
            let created = k
                .timestamp
                .and_then(DateTime::from_timestamp_millis)
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            vec![
                k.key.clone(),
                k.company_id.clone(),
                created,
                output::yes_no(k.deleted.unwrap_or(false)).to_string(),
            ]
        })
        .collect();
    output::print_table(out, &["Key", "CompanyId", "Created", "Deleted"], &rows)?;
    Ok(())
}

async fn create_key(
    ctx: &Context,
    credentials: Credentials,
    company_id: String,
    out: &mut dyn Write,
) -> Result<()> {
    require(&company_id, "email, password and company-id are required")?;
    let (login, password) = resolve_credentials(credentials)?;
    let client = YougileClient::new(&ctx.base_url()?)?;
    let body = CreateKeyRequest {
        login,
        password,
        company_id,
    };

    let created = output::with_spinner(ctx.json, "Creating API key...", client.create_key(&body))
        .await?;

    if ctx.json {
        output::print_json(out, &created)?;
    } else {
        writeln!(out, "API key created: {}", created.key)?;
    }
    Ok(())
}

async fn delete_key(ctx: &Context, key: &str, out: &mut dyn Write) -> Result<()> {
    require(key, "key is required")?;
    let client = YougileClient::new(&ctx.base_url()?)?;

    output::with_spinner(ctx.json, "Deleting API key...", client.delete_key(key)).await?;

    if ctx.json {
        output::print_json(out, &serde_json::json!({ "deleted": key }))?;
    } else {
        writeln!(out, "API key deleted")?;
    }
    Ok(())
}
