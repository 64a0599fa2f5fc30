use billbook_core::input::{parse_amount, parse_date};
use billbook_core::{CoreError, IndexTarget};

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters::format_amount;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

use super::bill::lookup_bill;
use super::{arg, parse_index, usage_error};

const USAGE: &str = "installment add <person> <bill> <DD/MM/YYYY|today> <amount> | installment delete <person> <bill> <installment>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "installment",
        "Record or remove a payment against a bill",
        USAGE,
        cmd_installment,
    )]
}

fn cmd_installment(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match arg(args, 0, USAGE)? {
        "add" => add(context, args),
        "delete" | "rm" => delete(context, args),
        _ => Err(usage_error(USAGE)),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let person = parse_index(arg(args, 1, USAGE)?, "person")?;
    let bill = parse_index(arg(args, 2, USAGE)?, "bill")?;
    let date = parse_date(arg(args, 3, USAGE)?)?;
    let amount = parse_amount(arg(args, 4, USAGE)?)?;
    context.session.add_installment(person, bill, date, amount)?;
    report_remaining(context, person, bill);
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let person = parse_index(arg(args, 1, USAGE)?, "person")?;
    let bill = parse_index(arg(args, 2, USAGE)?, "bill")?;
    let installment = parse_index(arg(args, 3, USAGE)?, "installment")?;
    let (_, parent) = lookup_bill(context, person, bill)?;
    let entry = parent
        .installments
        .get(installment)
        .ok_or(CoreError::IndexOutOfRange {
            target: IndexTarget::Installment,
            index: installment,
            len: parent.installments.len(),
        })?;
    let prompt = format!(
        "Delete the {} installment dated {} from the bill dated {}?",
        format_amount(&context.config.currency_symbol, entry.amount),
        entry.date,
        parent.date
    );
    if !context.confirm(&prompt)? {
        output::info("Deletion cancelled.");
        return Ok(());
    }
    let removed = context
        .session
        .delete_installment(person, bill, installment)?;
    output::success(format!(
        "Removed installment of {} dated {}.",
        format_amount(&context.config.currency_symbol, removed.amount),
        removed.date
    ));
    report_remaining(context, person, bill);
    Ok(())
}

fn report_remaining(context: &ShellContext, person: usize, bill: usize) {
    let symbol = &context.config.currency_symbol;
    if let Some(bill) = context
        .session
        .ledger()
        .person(person)
        .and_then(|entry| entry.bill(bill))
    {
        output::success(format!(
            "Paid {} of {}, remaining {}.",
            format_amount(symbol, bill.paid),
            format_amount(symbol, bill.amount),
            format_amount(symbol, bill.remaining())
        ));
    }
}
