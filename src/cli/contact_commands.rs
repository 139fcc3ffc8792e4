
use crate::cli::context::CLIContext;
use crate::error::{CrmError, CrmResult};
use crate::model::{Contact, ContactId};

const COLUMN_PADDING: usize = 2;

pub fn add(ctx: &mut CLIContext, name: Option<&str>, email: Option<&str>) -> CrmResult<()> {
    let mut name = name.unwrap_or_default().trim().to_string();
    let mut email = email.unwrap_or_default().trim().to_string();

    if name.is_empty() {
        name = ctx.prompt("Name: ")?;
    }
    if email.is_empty() {
        email = ctx.prompt("Email: ")?;
    }

    let contact = ctx
        .service
        .add_contact(&name, &email)
        .map_err(|e| e.context("add contact"))?;
    writeln!(
        ctx.out(),
        "Contact {:?} created with ID {}",
        contact.name,
        contact.id
    )?;
    Ok(())
}

pub fn list(ctx: &mut CLIContext) -> CrmResult<()> {
    let contacts = ctx.service.list_contacts()?;
    if contacts.is_empty() {
        writeln!(ctx.out(), "No contacts found.")?;
        return Ok(());
    }
    write!(ctx.out(), "{}", format_table(&contacts))?;
    Ok(())
}

pub fn show(ctx: &mut CLIContext, id: Option<ContactId>) -> CrmResult<()> {
    let id = ctx.resolve_id(id)?;
    let contact = ctx.service.get_contact(id)?;
    writeln!(ctx.out(), "ID: {}", contact.id)?;
    writeln!(ctx.out(), "Name: {}", contact.name)?;
    writeln!(ctx.out(), "Email: {}", contact.email)?;
    Ok(())
}

pub fn update(
    ctx: &mut CLIContext,
    id: Option<ContactId>,
    name: Option<&str>,
    email: Option<&str>,
) -> CrmResult<()> {
    let id = ctx.resolve_id(id)?;
    let mut name = name.unwrap_or_default().trim().to_string();
    let mut email = email.unwrap_or_default().trim().to_string();

    if name.is_empty() && email.is_empty() {
        name = ctx.prompt("New name (leave empty to keep): ")?;
        email = ctx.prompt("New email (leave empty to keep): ")?;
    }
    if name.is_empty() && email.is_empty() {
        return Err(CrmError::NoUpdateFields);
    }

    let contact = ctx
        .service
        .update_contact(id, &name, &email)
        .map_err(|e| e.context("update contact"))?;
    writeln!(
        ctx.out(),
        "Contact {} updated: {} <{}>",
        contact.id,
        contact.name,
        contact.email
    )?;
    Ok(())
}

pub fn delete(ctx: &mut CLIContext, id: Option<ContactId>) -> CrmResult<()> {
    let id = ctx.resolve_id(id)?;
    ctx.service
        .delete_contact(id)
        .map_err(|e| e.context("delete contact"))?;
    writeln!(ctx.out(), "Contact {} deleted", id)?;
    Ok(())
}

/// Lays contacts out in left-aligned columns under an `ID NAME EMAIL` header.
/// Every column but the last is padded to its widest cell plus two spaces.
pub fn format_table(contacts: &[Contact]) -> String {
    let rows: Vec<[String; 3]> = std::iter::once(["ID".into(), "NAME".into(), "EMAIL".into()])
        .chain(
            contacts
                .iter()
                .map(|c| [c.id.to_string(), c.name.clone(), c.email.clone()]),
        )
        .collect();

    let width = |col: usize| {
        rows.iter()
            .map(|row| row[col].chars().count())
            .max()
            .unwrap_or(0)
            + COLUMN_PADDING
    };
    let (id_width, name_width) = (width(0), width(1));

    let mut table = String::new();
    for [id, name, email] in &rows {
        table.push_str(&format!(
            "{:<id_width$}{:<name_width$}{}\n",
            id, name, email
        ));
    }
    table
}
