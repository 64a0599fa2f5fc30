use std::path::Path;

use billbook_core::input::{parse_amount, parse_date};
use billbook_core::{CoreError, IndexTarget};
use billbook_domain::{Bill, ImageRef, Person};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::format_amount;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

use super::{arg, parse_index, usage_error};

const USAGE: &str = "bill add <person> <DD/MM/YYYY|today> <amount> | bill delete <person> <bill> | bill image <person> <bill> <path|--clear>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "bill",
        "Add, delete, or attach a photo to a bill",
        USAGE,
        cmd_bill,
    )]
}

fn cmd_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match arg(args, 0, USAGE)? {
        "add" => add(context, args),
        "delete" | "rm" => delete(context, args),
        "image" => image(context, args),
        _ => Err(usage_error(USAGE)),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let person = parse_index(arg(args, 1, USAGE)?, "person")?;
    let date = parse_date(arg(args, 2, USAGE)?)?;
    let amount = parse_amount(arg(args, 3, USAGE)?)?;
    let index = context.session.add_bill(person, date, amount)?;
    output::success(format!(
        "Added bill of {} dated {} at index {}.",
        format_amount(&context.config.currency_symbol, amount),
        date,
        index
    ));
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let person = parse_index(arg(args, 1, USAGE)?, "person")?;
    let bill = parse_index(arg(args, 2, USAGE)?, "bill")?;
    let (owner, target) = lookup_bill(context, person, bill)?;
    let prompt = format!(
        "Delete the {} bill of {} dated {} and its {} installment(s)?",
        format_amount(&context.config.currency_symbol, target.amount),
        owner.name,
        target.date,
        target.installments.len()
    );
    if !context.confirm(&prompt)? {
        output::info("Deletion cancelled.");
        return Ok(());
    }
    let removed = context.session.delete_bill(person, bill)?;
    output::success(format!(
        "Deleted bill dated {} with {} installment(s).",
        removed.date,
        removed.installments.len()
    ));
    Ok(())
}

fn image(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let person = parse_index(arg(args, 1, USAGE)?, "person")?;
    let bill = parse_index(arg(args, 2, USAGE)?, "bill")?;
    let reference = arg(args, 3, USAGE)?;

    if reference == "--clear" {
        if !context.confirm("Remove the photo from this bill?")? {
            output::info("Cancelled.");
            return Ok(());
        }
        context.session.set_bill_image(person, bill, None)?;
        output::success("Photo reference removed. The file itself was not touched.");
        return Ok(());
    }

    if !Path::new(reference).exists() {
        output::warning(format!("`{}` does not exist yet; storing the reference anyway.", reference));
    }
    context
        .session
        .set_bill_image(person, bill, Some(ImageRef::new(reference)))?;
    output::success(format!("Attached `{}`.", reference));
    Ok(())
}

/// Resolves `person`/`bill` indices without changing anything.
pub(super) fn lookup_bill(
    context: &ShellContext,
    person: usize,
    bill: usize,
) -> Result<(&Person, &Bill), CommandError> {
    let ledger = context.session.ledger();
    let entry = ledger.person(person).ok_or(CoreError::IndexOutOfRange {
        target: IndexTarget::Person,
        index: person,
        len: ledger.len(),
    })?;
    let found = entry.bill(bill).ok_or(CoreError::IndexOutOfRange {
        target: IndexTarget::Bill,
        index: bill,
        len: entry.bills.len(),
    })?;
    Ok((entry, found))
}
