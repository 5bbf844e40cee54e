use std::io::Write;

use anyhow::Result;
use yougile_shared::{ContactFields, CreateContactPerson};

use crate::cli::{ContactPersonsCommand, ContactsCommand, CrmCommand};
use crate::context::Context;
use crate::output;

use super::{print_object, require};

pub async fn run(ctx: &Context, cmd: CrmCommand, out: &mut dyn Write) -> Result<()> {
    match cmd {
        CrmCommand::ContactPersons(ContactPersonsCommand::Create {
            title,
            project_id,
            email,
            phone,
            address,
            position,
            additional_phone,
        }) => {
            require(&title, "title is required (--title)")?;
            require(&project_id, "project-id is required (--project-id)")?;
            let fields = ContactFields {
                email: non_empty(email),
                phone: non_empty(phone),
                address: non_empty(address),
                position: non_empty(position),
                additional_phone: non_empty(additional_phone),
            };
            let body = CreateContactPerson {
                title,
                project_id,
                fields: (!fields.is_empty()).then_some(fields),
            };
            create_contact_person(ctx, &body, out).await
        }
        CrmCommand::Contacts(ContactsCommand::ByExternalId { provider, chat_id }) => {
            require(&provider, "provider is required (--provider)")?;
            require(&chat_id, "chat-id is required (--chat-id)")?;
            find_by_external_id(ctx, &provider, &chat_id, out).await
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn create_contact_person(
    ctx: &Context,
    body: &CreateContactPerson,
    out: &mut dyn Write,
) -> Result<()> {
    let client = ctx.client()?;
    let created = output::with_spinner(
        ctx.json,
        "Creating contact person...",
        client.create_contact_person(body),
    )
    .await?;

    if ctx.json {
        output::print_json(out, &created)?;
    } else {
        writeln!(out, "Contact person created: id={}", created.id)?;
    }
    Ok(())
}

async fn find_by_external_id(
    ctx: &Context,
    provider: &str,
    chat_id: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let client = ctx.client()?;
    let contact = output::with_spinner(
        ctx.json,
        "Looking up contact...",
        client.find_contact_by_external_id(provider, chat_id),
    )
    .await?;

    match contact {
        Some(contact) => print_object(ctx, out, &contact),
        None if ctx.json => {
            output::print_json(out, &serde_json::Value::Null)?;
            Ok(())
        }
        None => {
            writeln!(out, "No contact found")?;
            Ok(())
        }
    }
}
